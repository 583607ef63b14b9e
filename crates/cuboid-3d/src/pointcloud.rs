use crate::error::{CuboidError, CuboidResult};

fn check_flat_len(name: &'static str, len: usize) -> CuboidResult<()> {
    if len % 3 != 0 {
        return Err(CuboidError::InvalidBufferLength { name, len });
    }
    Ok(())
}

/// Check that a color buffer of `colors_len` floats is parallel to `points`.
pub(crate) fn check_parallel(points: &PointBuffer<'_>, colors_len: usize) -> CuboidResult<()> {
    check_flat_len("colors", colors_len)?;
    if colors_len != points.as_slice().len() {
        return Err(CuboidError::MismatchedBufferLengths {
            left_name: "points",
            left_len: points.as_slice().len(),
            right_name: "colors",
            right_len: colors_len,
        });
    }
    Ok(())
}

/// Read-only view over a flat `[x0, y0, z0, x1, y1, z1, ..]` point buffer.
#[derive(Debug, Clone, Copy)]
pub struct PointBuffer<'a> {
    data: &'a [f32],
}

impl<'a> PointBuffer<'a> {
    /// Wrap a flat buffer, checking that it holds whole points.
    pub fn new(data: &'a [f32]) -> CuboidResult<Self> {
        check_flat_len("points", data.len())?;
        Ok(Self { data })
    }

    /// Number of points in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / 3
    }

    /// Check if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying flat buffer.
    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Iterate over the points without allocating.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = [f32; 3]> + 'a {
        self.data.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }
}

/// Mutable view over a flat RGB color buffer parallel to a [`PointBuffer`].
#[derive(Debug)]
pub struct ColorBuffer<'a> {
    data: &'a mut [f32],
}

impl<'a> ColorBuffer<'a> {
    /// Wrap a flat color buffer, checking it matches `points` element for element.
    pub fn new(data: &'a mut [f32], points: &PointBuffer<'_>) -> CuboidResult<Self> {
        check_parallel(points, data.len())?;
        Ok(Self { data })
    }

    /// Number of colors in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / 3
    }

    /// Check if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Color of element `index`.
    ///
    /// PRECONDITION: `index < self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> [f32; 3] {
        let c = &self.data[index * 3..index * 3 + 3];
        [c[0], c[1], c[2]]
    }

    /// Overwrite the color of element `index`.
    ///
    /// PRECONDITION: `index < self.len()`.
    #[inline]
    pub fn set(&mut self, index: usize, color: [f32; 3]) {
        self.data[index * 3..index * 3 + 3].copy_from_slice(&color);
    }
}

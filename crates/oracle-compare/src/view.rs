//! Rank-1 and rank-2 views over borrowed storage, and the owning [`Matrix`].
//!
//! Views never own their elements. Strides are in elements; element `i` of a
//! vector view lives at `i * stride`, element `(i, j)` of a matrix view at
//! `i * row_stride + j * col_stride`. Construction validates that every
//! addressable element lies inside the backing slice, so indexing a valid view
//! can only panic on an out-of-range index.
//!
//! Owning sequences (`Vec<T>`, slices, arrays, [`Matrix<T>`]) reach the
//! comparators through [`AsVectorView`] / [`AsMatrixView`]; that conversion is
//! shape-derived and never copies.

use oracle_common::{OracleError, Result};
use std::ops::{Index, IndexMut};

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_vector(data_len: usize, len: usize, stride: usize) -> Result<()> {
    if len == 0 {
        return Ok(());
    }
    if stride == 0 && len > 1 {
        return Err(OracleError::InvalidView {
            reason: format!("stride 0 is not allowed for extent {len}"),
        });
    }
    let last = (len - 1).checked_mul(stride).ok_or_else(|| OracleError::InvalidView {
        reason: format!("offset overflow: extent {len}, stride {stride}"),
    })?;
    if last >= data_len {
        return Err(OracleError::InvalidView {
            reason: format!(
                "extent {len} with stride {stride} reaches offset {last}, storage holds {data_len}"
            ),
        });
    }
    Ok(())
}

fn validate_matrix(
    data_len: usize,
    rows: usize,
    cols: usize,
    row_stride: usize,
    col_stride: usize,
) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    if (rows > 1 && row_stride == 0) || (cols > 1 && col_stride == 0) {
        return Err(OracleError::InvalidView {
            reason: format!(
                "zero stride for a non-trivial extent: {rows}x{cols}, strides ({row_stride}, {col_stride})"
            ),
        });
    }
    let last = (rows - 1)
        .checked_mul(row_stride)
        .and_then(|r| (cols - 1).checked_mul(col_stride).and_then(|c| r.checked_add(c)))
        .ok_or_else(|| OracleError::InvalidView {
            reason: format!("offset overflow: {rows}x{cols}, strides ({row_stride}, {col_stride})"),
        })?;
    if last >= data_len {
        return Err(OracleError::InvalidView {
            reason: format!(
                "{rows}x{cols} with strides ({row_stride}, {col_stride}) reaches offset {last}, storage holds {data_len}"
            ),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// VectorView / VectorViewMut
// ---------------------------------------------------------------------------

/// Read-only rank-1 view.
#[derive(Debug)]
pub struct VectorView<'a, T> {
    data: &'a [T],
    len: usize,
    stride: usize,
}

impl<T> Clone for VectorView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VectorView<'_, T> {}

impl<'a, T> VectorView<'a, T> {
    /// Contiguous view over the whole slice.
    pub fn new(data: &'a [T]) -> Self {
        Self { data, len: data.len(), stride: 1 }
    }

    /// View of `len` elements spaced `stride` apart.
    pub fn strided(data: &'a [T], len: usize, stride: usize) -> Result<Self> {
        validate_vector(data.len(), len, stride)?;
        Ok(Self { data, len, stride })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == 1 || self.len <= 1
    }

    pub fn get(&self, i: usize) -> Option<&'a T> {
        if i < self.len { Some(&self.data[i * self.stride]) } else { None }
    }

    pub fn iter(self) -> impl Iterator<Item = &'a T> {
        let Self { data, len, stride } = self;
        (0..len).map(move |i| &data[i * stride])
    }

    /// Copy the viewed elements into a contiguous `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Index<usize> for VectorView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        assert!(i < self.len, "index {i} out of bounds for vector of extent {}", self.len);
        &self.data[i * self.stride]
    }
}

/// Mutable rank-1 view.
#[derive(Debug)]
pub struct VectorViewMut<'a, T> {
    data: &'a mut [T],
    len: usize,
    stride: usize,
}

impl<'a, T> VectorViewMut<'a, T> {
    pub fn new(data: &'a mut [T]) -> Self {
        let len = data.len();
        Self { data, len, stride: 1 }
    }

    pub fn strided(data: &'a mut [T], len: usize, stride: usize) -> Result<Self> {
        validate_vector(data.len(), len, stride)?;
        Ok(Self { data, len, stride })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_view(&self) -> VectorView<'_, T> {
        VectorView { data: &*self.data, len: self.len, stride: self.stride }
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        if i < self.len { Some(&mut self.data[i * self.stride]) } else { None }
    }
}

impl<T> Index<usize> for VectorViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        assert!(i < self.len, "index {i} out of bounds for vector of extent {}", self.len);
        &self.data[i * self.stride]
    }
}

impl<T> IndexMut<usize> for VectorViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        assert!(i < self.len, "index {i} out of bounds for vector of extent {}", self.len);
        &mut self.data[i * self.stride]
    }
}

// ---------------------------------------------------------------------------
// MatrixView / MatrixViewMut
// ---------------------------------------------------------------------------

fn row_major_contiguous(rows: usize, cols: usize, row_stride: usize, col_stride: usize) -> bool {
    (cols <= 1 || col_stride == 1) && (rows <= 1 || row_stride == cols)
}

fn col_major_contiguous(rows: usize, cols: usize, row_stride: usize, col_stride: usize) -> bool {
    (rows <= 1 || row_stride == 1) && (cols <= 1 || col_stride == rows)
}

/// Read-only rank-2 view.
#[derive(Debug)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    row_stride: usize,
    col_stride: usize,
}

impl<T> Clone for MatrixView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatrixView<'_, T> {}

impl<'a, T> MatrixView<'a, T> {
    /// Row-major view: element `(i, j)` at `i * cols + j`.
    pub fn row_major(data: &'a [T], rows: usize, cols: usize) -> Result<Self> {
        Self::strided(data, rows, cols, cols, 1)
    }

    /// Column-major view: element `(i, j)` at `i + j * rows`.
    pub fn col_major(data: &'a [T], rows: usize, cols: usize) -> Result<Self> {
        Self::strided(data, rows, cols, 1, rows)
    }

    pub fn strided(
        data: &'a [T],
        rows: usize,
        cols: usize,
        row_stride: usize,
        col_stride: usize,
    ) -> Result<Self> {
        validate_matrix(data.len(), rows, cols, row_stride, col_stride)?;
        Ok(Self { data, rows, cols, row_stride, col_stride })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn extents(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_row_major_contiguous(&self) -> bool {
        row_major_contiguous(self.rows, self.cols, self.row_stride, self.col_stride)
    }

    pub fn is_col_major_contiguous(&self) -> bool {
        col_major_contiguous(self.rows, self.cols, self.row_stride, self.col_stride)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&'a T> {
        if i < self.rows && j < self.cols {
            Some(&self.data[i * self.row_stride + j * self.col_stride])
        } else {
            None
        }
    }

    /// All `rows * cols` elements as one rank-1 view in storage order.
    ///
    /// The storage must be contiguous (row- or column-major). Two matrices
    /// flattened for comparison must also share the same ordering; that part
    /// is the caller's responsibility and is not checked.
    pub fn flatten(self) -> VectorView<'a, T> {
        debug_assert!(
            self.is_row_major_contiguous() || self.is_col_major_contiguous(),
            "flatten requires contiguous storage: {}x{} with strides ({}, {})",
            self.rows,
            self.cols,
            self.row_stride,
            self.col_stride,
        );
        VectorView::new(&self.data[..self.rows * self.cols])
    }

    /// Copy the elements into a row-major `Vec`.
    pub fn to_row_major_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.rows * self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.push(self[(i, j)].clone());
            }
        }
        out
    }
}

impl<T> Index<(usize, usize)> for MatrixView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i * self.row_stride + j * self.col_stride]
    }
}

/// Mutable rank-2 view.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    data: &'a mut [T],
    rows: usize,
    cols: usize,
    row_stride: usize,
    col_stride: usize,
}

impl<'a, T> MatrixViewMut<'a, T> {
    pub fn row_major(data: &'a mut [T], rows: usize, cols: usize) -> Result<Self> {
        Self::strided(data, rows, cols, cols, 1)
    }

    pub fn col_major(data: &'a mut [T], rows: usize, cols: usize) -> Result<Self> {
        Self::strided(data, rows, cols, 1, rows)
    }

    pub fn strided(
        data: &'a mut [T],
        rows: usize,
        cols: usize,
        row_stride: usize,
        col_stride: usize,
    ) -> Result<Self> {
        validate_matrix(data.len(), rows, cols, row_stride, col_stride)?;
        Ok(Self { data, rows, cols, row_stride, col_stride })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn extents(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView {
            data: &*self.data,
            rows: self.rows,
            cols: self.cols,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
        }
    }
}

impl<T> Index<(usize, usize)> for MatrixViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i * self.row_stride + j * self.col_stride]
    }
}

impl<T> IndexMut<(usize, usize)> for MatrixViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[i * self.row_stride + j * self.col_stride]
    }
}

// ---------------------------------------------------------------------------
// Matrix (owning, row-major)
// ---------------------------------------------------------------------------

/// Owning row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    /// Wrap row-major `data` of exactly `rows * cols` elements.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or(OracleError::LengthMismatch {
            expected: usize::MAX,
            rows,
            cols,
            actual: data.len(),
        })?;
        if data.len() != expected {
            return Err(OracleError::LengthMismatch { expected, rows, cols, actual: data.len() });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { data, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn extents(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn view(&self) -> MatrixView<'_, T> {
        MatrixView {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            row_stride: self.cols,
            col_stride: 1,
        }
    }

    pub fn view_mut(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut {
            data: &mut self.data,
            rows: self.rows,
            cols: self.cols,
            row_stride: self.cols,
            col_stride: 1,
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[i * self.cols + j]
    }
}

// ---------------------------------------------------------------------------
// Conversion to views
// ---------------------------------------------------------------------------

/// Anything that can be compared as a rank-1 operand.
pub trait AsVectorView {
    type Elem;

    fn as_vector_view(&self) -> VectorView<'_, Self::Elem>;
}

impl<T> AsVectorView for VectorView<'_, T> {
    type Elem = T;

    fn as_vector_view(&self) -> VectorView<'_, T> {
        *self
    }
}

impl<T> AsVectorView for VectorViewMut<'_, T> {
    type Elem = T;

    fn as_vector_view(&self) -> VectorView<'_, T> {
        self.as_view()
    }
}

impl<T> AsVectorView for [T] {
    type Elem = T;

    fn as_vector_view(&self) -> VectorView<'_, T> {
        VectorView::new(self)
    }
}

impl<T, const N: usize> AsVectorView for [T; N] {
    type Elem = T;

    fn as_vector_view(&self) -> VectorView<'_, T> {
        VectorView::new(self.as_slice())
    }
}

impl<T> AsVectorView for Vec<T> {
    type Elem = T;

    fn as_vector_view(&self) -> VectorView<'_, T> {
        VectorView::new(self.as_slice())
    }
}

/// Anything that can be compared as a rank-2 operand.
pub trait AsMatrixView {
    type Elem;

    fn as_matrix_view(&self) -> MatrixView<'_, Self::Elem>;
}

impl<T> AsMatrixView for MatrixView<'_, T> {
    type Elem = T;

    fn as_matrix_view(&self) -> MatrixView<'_, T> {
        *self
    }
}

impl<T> AsMatrixView for MatrixViewMut<'_, T> {
    type Elem = T;

    fn as_matrix_view(&self) -> MatrixView<'_, T> {
        self.as_view()
    }
}

impl<T> AsMatrixView for Matrix<T> {
    type Elem = T;

    fn as_matrix_view(&self) -> MatrixView<'_, T> {
        self.view()
    }
}

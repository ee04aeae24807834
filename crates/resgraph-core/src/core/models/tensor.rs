use crate::core::features::table;
use std::fmt;
use thiserror::Error;

/// Numeric element type of a [`Tensor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    F32,
    I64,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DType::F32 => "float32",
                DType::I64 => "int64",
            }
        )
    }
}

/// Scalar types that can be stored in a [`Tensor`].
pub trait Element: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    const DTYPE: DType;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
}

impl Element for i64 {
    const DTYPE: DType = DType::I64;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TensorError {
    #[error("Shape {shape:?} describes {expected} elements but {found} were provided")]
    LengthMismatch {
        shape: Vec<usize>,
        expected: usize,
        found: usize,
    },
}

/// Row-major flat buffer with an explicit shape.
///
/// The shape is only checked against the buffer length; dimensional contracts
/// (e.g. "must be 2-D") are enforced by
/// [`validate_shapes`](crate::core::validation::validate_shapes).
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T: Element> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T: Element> Tensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(TensorError::LengthMismatch {
                shape,
                expected,
                found: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Builds a 2-D tensor; the length is consistent by construction.
    pub(crate) fn from_rows_unchecked(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        Self {
            shape: vec![rows, cols],
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the elements; the shape stays fixed.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of rows and columns, if the tensor is 2-D.
    pub fn dims2(&self) -> Option<(usize, usize)> {
        match self.shape.as_slice() {
            &[rows, cols] => Some((rows, cols)),
            _ => None,
        }
    }

    /// Row `r` of a 2-D tensor.
    pub fn row(&self, r: usize) -> Option<&[T]> {
        let (rows, cols) = self.dims2()?;
        if r >= rows {
            return None;
        }
        self.data.get(r * cols..(r + 1) * cols)
    }

    /// Element at `(r, c)` of a 2-D tensor.
    pub fn get2(&self, r: usize, c: usize) -> Option<T> {
        let (rows, cols) = self.dims2()?;
        if r >= rows || c >= cols {
            return None;
        }
        self.data.get(r * cols + c).copied()
    }
}

/// The three typed arrays handed to array-based consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedGraph {
    pub node_features: Tensor<f32>, // [N, 7]
    pub edge_index: Tensor<i64>,    // [2, E]
    pub edge_attr: Tensor<f32>,     // [E, 1]
}

/// One node row split back into its named segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedResidue {
    pub residue_index: usize,
    pub physchem: [f32; 3],
    pub coord: [f32; 3],
}

impl DecodedResidue {
    /// Three-letter code of the residue type, if the index is in the table.
    pub fn residue_name(&self) -> Option<&'static str> {
        table::name_for_index(self.residue_index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedGraph {
    pub residues: Vec<DecodedResidue>,
    pub edge_index: Tensor<i64>,
    pub edge_attr: Tensor<f32>,
}

impl DecodedGraph {
    pub fn num_edges(&self) -> usize {
        self.edge_index.dims2().map_or(0, |(_, cols)| cols)
    }

    /// Iterates `(src, dst, distance)` triples in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (i64, i64, f32)> + '_ {
        (0..self.num_edges()).filter_map(move |k| {
            Some((
                self.edge_index.get2(0, k)?,
                self.edge_index.get2(1, k)?,
                self.edge_attr.get2(k, 0)?,
            ))
        })
    }
}

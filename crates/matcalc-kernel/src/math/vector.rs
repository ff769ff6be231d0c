use std::fmt;
use std::ops::Index;
use std::slice::Iter;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

/// Non-empty vector of finite reals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn new(data: Vec<f64>) -> Result<Self> {
        if data.is_empty() {
            return Err(KernelError::EmptyVector);
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(KernelError::NonFiniteComponent { index });
        }
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed vector; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Entry-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Vector, tol: f64) -> bool {
        self.len() == other.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

impl TryFrom<Vec<f64>> for Vector {
    type Error = KernelError;

    fn try_from(value: Vec<f64>) -> Result<Self> {
        Vector::new(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_on_construction() {
        assert_eq!(Vector::new(vec![]), Err(KernelError::EmptyVector));
        assert_eq!(
            Vector::new(vec![1.0, f64::NEG_INFINITY]),
            Err(KernelError::NonFiniteComponent { index: 1 })
        );
        let v = Vector::new(vec![3.0, 5.0]).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v[1], 5.0);
        assert_eq!(v.to_string(), "[3, 5]");
    }

    #[test]
    fn serde_uses_plain_arrays() {
        let v: Vector = serde_json::from_str("[1.5, 2]").unwrap();
        assert_eq!(v.as_slice(), &[1.5, 2.0]);
        assert!(serde_json::from_str::<Vector>("[]").is_err());
    }
}

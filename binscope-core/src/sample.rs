use binscope_common::{BinscopeError, Result};

/// A one-dimensional sample with optional per-event weights.
///
/// Values are finite. When present, `weights` is parallel to `values` and every
/// weight is finite and non-negative; absent weights mean weight 1 per event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
    values: Vec<f64>,
    weights: Option<Vec<f64>>,
}

impl Sample {
    pub fn new(values: Vec<f64>, weights: Option<Vec<f64>>) -> Result<Self> {
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(BinscopeError::Other(format!(
                "non-finite value {} at index {i}",
                values[i]
            )));
        }
        if let Some(w) = &weights {
            if w.len() != values.len() {
                return Err(BinscopeError::MalformedWeights(format!(
                    "{} weights for {} values",
                    w.len(),
                    values.len()
                )));
            }
            if let Some(i) = w.iter().position(|x| !x.is_finite() || *x < 0.0) {
                return Err(BinscopeError::MalformedWeights(format!(
                    "weight {} at index {i} is not a finite non-negative number",
                    w[i]
                )));
            }
        }
        Ok(Self { values, weights })
    }

    pub fn unweighted(values: Vec<f64>) -> Result<Self> {
        Self::new(values, None)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Weight of event `i`, 1.0 for unweighted samples.
    pub fn weight(&self, i: usize) -> f64 {
        self.weights.as_ref().map(|w| w[i]).unwrap_or(1.0)
    }

    /// `(value, weight)` pairs in sample order.
    pub fn events(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (v, self.weight(i)))
    }

    /// Smallest and largest value, `None` when empty.
    pub fn range(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    pub fn total_weight(&self) -> f64 {
        match &self.weights {
            Some(w) => w.iter().sum(),
            None => self.values.len() as f64,
        }
    }

    /// Concatenate parts loaded from several files. Weighted and unweighted parts
    /// cannot be mixed.
    pub fn concat(parts: Vec<Sample>) -> Result<Self> {
        let weighted = parts.iter().filter(|p| p.is_weighted()).count();
        if weighted != 0 && weighted != parts.len() {
            return Err(BinscopeError::MalformedWeights(format!(
                "{weighted} of {} inputs carry weights",
                parts.len()
            )));
        }
        let mut values = Vec::with_capacity(parts.iter().map(Sample::len).sum());
        let mut weights = (weighted > 0).then(|| Vec::with_capacity(values.capacity()));
        for part in parts {
            values.extend(part.values);
            if let (Some(all), Some(w)) = (weights.as_mut(), part.weights) {
                all.extend(w);
            }
        }
        Ok(Self { values, weights })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_weights() {
        let err = Sample::new(vec![1.0, 2.0], Some(vec![1.0])).unwrap_err();
        assert!(matches!(err, BinscopeError::MalformedWeights(_)));
    }

    #[test]
    fn rejects_negative_weight() {
        assert!(Sample::new(vec![1.0], Some(vec![-0.5])).is_err());
    }

    #[test]
    fn rejects_nan_value() {
        assert!(Sample::unweighted(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn implicit_weight_is_one() {
        let s = Sample::unweighted(vec![3.0, 4.0]).unwrap();
        assert_eq!(s.weight(1), 1.0);
        assert_eq!(s.total_weight(), 2.0);
        assert_eq!(s.range(), Some((3.0, 4.0)));
    }

    #[test]
    fn empty_sample_has_no_range() {
        assert_eq!(Sample::default().range(), None);
    }

    #[test]
    fn concat_keeps_weights_in_order() {
        let a = Sample::new(vec![1.0], Some(vec![0.5])).unwrap();
        let b = Sample::new(vec![2.0, 3.0], Some(vec![2.0, 1.0])).unwrap();
        let c = Sample::concat(vec![a, b]).unwrap();
        assert_eq!(c.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(c.weights(), Some(&[0.5, 2.0, 1.0][..]));
    }

    #[test]
    fn concat_rejects_mixed_weighting() {
        let a = Sample::new(vec![1.0], Some(vec![0.5])).unwrap();
        let b = Sample::unweighted(vec![2.0]).unwrap();
        assert!(Sample::concat(vec![a, b]).is_err());
    }
}

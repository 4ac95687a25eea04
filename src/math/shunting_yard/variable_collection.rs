use crate::prelude::*;

/// anything that can provide values for `x[n]` variables
pub trait VariableSource {
    fn get_value(&self, index: usize) -> Option<f64>;
}

impl VariableSource for HashMap<usize, f64> {
    fn get_value(&self, index: usize) -> Option<f64> { self.get(&index).copied() }
}
impl VariableSource for BTreeMap<usize, f64> {
    fn get_value(&self, index: usize) -> Option<f64> { self.get(&index).copied() }
}
/// the position in the slice is the variable index
impl VariableSource for [f64] {
    fn get_value(&self, index: usize) -> Option<f64> { self.get(index).copied() }
}
impl VariableSource for Vec<f64> {
    fn get_value(&self, index: usize) -> Option<f64> { self.get(index).copied() }
}
impl<V: VariableSource + ?Sized> VariableSource for &V {
    fn get_value(&self, index: usize) -> Option<f64> { (**self).get_value(index) }
}


/// variable values for a single evaluation
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueCollection(HashMap<usize, f64>);
impl ValueCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_chained(mut self, index: usize, value: impl Into<f64>) -> Self {
        self.set(index, value);
        self
    }

    pub fn set(&mut self, index: usize, value: impl Into<f64>) {
        self.0.insert(index, value.into());
    }

    pub fn set_multiple(&mut self, list: impl Iterator<Item=(usize, impl Into<f64>)>) {
        for (index, value) in list {
            self.set(index, value);
        }
    }

    pub fn remove(&mut self, index: usize) {
        self.0.remove(&index);
    }

    pub fn exists(&self, index: usize) -> bool {
        self.0.contains_key(&index)
    }

    pub fn get(&self, index: usize) -> ShuntingYardResult<f64> {
        self.0.get(&index).copied().ok_or(ShuntingYardError::UnboundVariable(index))
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}
impl VariableSource for ValueCollection {
    fn get_value(&self, index: usize) -> Option<f64> { self.0.get(&index).copied() }
}

impl<V: Into<f64>> FromIterator<(usize, V)> for ValueCollection {
    fn from_iter<T: IntoIterator<Item = (usize, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(i, v)| (i, v.into())).collect())
    }
}
impl IntoIterator for ValueCollection {
    type Item = (usize, f64);
    type IntoIter = std::collections::hash_map::IntoIter<usize, f64>;
    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}
impl From<HashMap<usize, f64>> for ValueCollection {
    fn from(value: HashMap<usize, f64>) -> Self { Self(value) }
}


#[allow(unused)]
mod value_collection_tests {
    use crate::prelude::*;

    #[test]
    fn set_and_get() {
        let mut values = ValueCollection::new()
            .set_chained(0, 5.0)
            .set_chained(2, 7i32);

        assert_eq!(values.get(0), Ok(5.0));
        assert_eq!(values.get(2), Ok(7.0));
        assert_eq!(values.get(1), Err(ShuntingYardError::UnboundVariable(1)));

        values.remove(0);
        assert!(!values.exists(0));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn sources() {
        let values: ValueCollection = [(1, 2.0f32), (3, 4.0)].into_iter().collect();
        assert_eq!(values.get_value(3), Some(4.0));

        let slice = vec![1.0, 2.0];
        assert_eq!(slice.get_value(1), Some(2.0));
        assert_eq!(slice.get_value(2), None);

        let map = BTreeMap::from([(4usize, 1.5)]);
        assert_eq!((&map).get_value(4), Some(1.5));
    }

    #[test]
    fn json_object() {
        let values: ValueCollection = serde_json::from_str(r#"{"0": 5, "2": 7.5}"#).unwrap();
        assert_eq!(values.get(0), Ok(5.0));
        assert_eq!(values.get(2), Ok(7.5));
    }
}

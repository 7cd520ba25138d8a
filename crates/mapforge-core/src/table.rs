//! Keyed tables: rows addressed by one designated field.

use ahash::AHashMap;

/// A row that carries its own key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Ordered table keyed by [`Keyed::key`].
///
/// A repeated key keeps the position of its first occurrence but takes the
/// values of the latest row.
#[derive(Debug, Clone)]
pub struct KeyedTable<T> {
    rows: Vec<T>,
    index: AHashMap<String, usize>,
}

impl<T> Default for KeyedTable<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: AHashMap::new(),
        }
    }
}

impl<T: Keyed> KeyedTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row: T) {
        let existing = self.index.get(row.key()).copied();
        match existing {
            Some(i) => self.rows[i] = row,
            None => {
                self.index.insert(row.key().to_string(), self.rows.len());
                self.rows.push(row);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.rows[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

impl<T: Keyed> FromIterator<T> for KeyedTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        for row in iter {
            table.insert(row);
        }
        table
    }
}

impl<'a, T> IntoIterator for &'a KeyedTable<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, u32);

    impl Keyed for Row {
        fn key(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn repeated_key_keeps_position_and_takes_latest_values() {
        let table: KeyedTable<Row> = [Row("a", 1), Row("b", 2), Row("a", 3)]
            .into_iter()
            .collect();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.iter().cloned().collect::<Vec<_>>(),
            vec![Row("a", 3), Row("b", 2)]
        );
        assert_eq!(table.get("a"), Some(&Row("a", 3)));
        assert!(table.get("c").is_none());
    }
}

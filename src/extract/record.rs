// src/extract/record.rs

/// One course section, keyed by whatever headers the results table carried.
///
/// Fields keep the table's column order. Values are raw cell text; numeric
/// columns are parsed by whoever needs them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CourseRecord {
    fields: Vec<(String, String)>,
}

impl CourseRecord {
    /// Pair headers with a row's cells positionally.
    pub fn from_row<'a, H, C>(headers: H, cells: C) -> Self
    where
        H: IntoIterator<Item = &'a String>,
        C: IntoIterator<Item = &'a String>,
    {
        CourseRecord {
            fields: headers
                .into_iter()
                .zip(cells)
                .map(|(h, c)| (h.clone(), c.clone()))
                .collect(),
        }
    }

    /// Value under `header`. With duplicated headers the right-most column wins.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn crn(&self) -> Option<&str> {
        self.get("CRN")
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(h, _)| h.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CourseRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CourseRecord {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_last_duplicate() {
        let rec: CourseRecord = [("Note", "a"), ("CRN", "1"), ("Note", "b")]
            .into_iter()
            .collect();
        assert_eq!(rec.get("Note"), Some("b"));
        assert_eq!(rec.crn(), Some("1"));
        assert_eq!(rec.get("Missing"), None);
        assert_eq!(rec.headers().collect::<Vec<_>>(), ["Note", "CRN", "Note"]);
    }
}

use crate::record::ActionRecord;

/// Pending records keyed by action name, in insertion order.
///
/// Tables stay small (one entry per in-flight UI action), so a vector with
/// linear lookup keeps ordering simple.
#[derive(Debug, Default)]
pub(crate) struct ActionTable {
    entries: Vec<(String, ActionRecord)>,
}

impl ActionTable {
    pub(crate) fn get(&self, name: &str) -> Option<&ActionRecord> {
        self.entries
            .iter()
            .find_map(|(key, record)| (key == name).then_some(record))
    }

    /// Returns the record for `name`, inserting an empty one at the end if absent.
    pub(crate) fn entry(&mut self, name: &str) -> &mut ActionRecord {
        let index = match self.position(name) {
            Some(index) => index,
            None => {
                self.entries
                    .push((name.to_string(), ActionRecord::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<ActionRecord> {
        let index = self.position(name)?;
        Some(self.entries.remove(index).1)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &ActionRecord)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == name)
    }
}

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// The whole index document.
///
/// Plugin records stay raw YAML: only the fields an update touches are ever
/// looked at, everything else is written back as it was read.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RepoIndex {
    pub plugins: Vec<Value>,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl RepoIndex {
    /// Plugin records that are mappings. Anything else can't match a name.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = PluginEntry<'_>> {
        self.plugins
            .iter_mut()
            .filter_map(Value::as_mapping_mut)
            .map(PluginEntry)
    }
}

/// Mutable view of one plugin record.
#[derive(Debug)]
pub struct PluginEntry<'a>(&'a mut Mapping);

impl PluginEntry<'_> {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// The stored version as text, if it is a scalar.
    pub fn version(&self) -> Option<String> {
        match self.0.get("version")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn set_version(&mut self, version: &str) {
        self.0.insert(Value::from("version"), Value::from(version));
    }

    pub fn set_updated(&mut self, updated: &str) {
        self.0.insert(Value::from("updated"), Value::from(updated));
    }

    /// Binary records that are mappings; a missing `binaries` key yields none.
    pub fn binaries_mut(&mut self) -> impl Iterator<Item = PluginBinary<'_>> {
        self.0
            .get_mut("binaries")
            .and_then(Value::as_sequence_mut)
            .into_iter()
            .flatten()
            .filter_map(Value::as_mapping_mut)
            .map(PluginBinary)
    }
}

/// Mutable view of one binary record of a plugin.
#[derive(Debug)]
pub struct PluginBinary<'a>(&'a mut Mapping);

impl PluginBinary<'_> {
    pub fn platform(&self) -> Option<&str> {
        self.0.get("platform").and_then(Value::as_str)
    }

    pub fn set_url(&mut self, url: &str) {
        self.0.insert(Value::from("url"), Value::from(url));
    }

    pub fn set_checksum(&mut self, checksum: &str) {
        self.0.insert(Value::from("checksum"), Value::from(checksum));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(content: &str) -> RepoIndex {
        serde_yaml::from_str(content).unwrap()
    }

    #[test]
    fn numeric_version_is_read_as_text() {
        let mut index = index("plugins:\n- name: a\n  version: 4.0\n- name: b\n  version: [1]\n");
        let versions: Vec<_> = index.entries_mut().map(|e| e.version()).collect();

        assert_eq!(versions, vec![Some("4.0".to_owned()), None]);
    }

    #[test]
    fn setters_keep_key_position() {
        let mut index = index(
            "plugins:\n- name: a\n  version: 1.0.0\n  company: c\n  binaries:\n  - platform: osx\n    url: old\n    size: 3\n",
        );

        let mut entry = index.entries_mut().next().unwrap();
        entry.set_version("2.0.0");
        let mut binary = entry.binaries_mut().next().unwrap();
        binary.set_url("new");
        binary.set_checksum("abc");

        assert_eq!(
            serde_yaml::to_string(&index).unwrap(),
            "plugins:\n- name: a\n  version: 2.0.0\n  company: c\n  binaries:\n  - platform: osx\n    url: new\n    size: 3\n    checksum: abc\n"
        );
    }

    #[test]
    fn records_of_any_shape_are_accepted() {
        let mut index = index(
            "plugins:\n- just a string\n- name: 7\n  binaries: nope\n- name: b\n  binaries:\n  - url: u\n  - 3\n  - platform: osx\n",
        );

        let names: Vec<_> = index.entries_mut().map(|e| e.name().map(str::to_owned)).collect();
        assert_eq!(names, vec![None, Some("b".to_owned())]);

        let mut entries = index.entries_mut();
        assert_eq!(entries.next().unwrap().binaries_mut().count(), 0);

        let mut last = entries.next().unwrap();
        let platforms: Vec<_> = last
            .binaries_mut()
            .map(|b| b.platform().map(str::to_owned))
            .collect();
        assert_eq!(platforms, vec![None, Some("osx".to_owned())]);
    }

    #[test]
    fn other_top_level_keys_are_kept() {
        let index = index("plugins: []\nmirror: null\n");

        assert_eq!(index.extra.get("mirror"), Some(&Value::Null));
        assert_eq!(
            serde_yaml::to_string(&index).unwrap(),
            "plugins: []\nmirror: null\n"
        );
    }
}

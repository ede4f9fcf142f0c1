use std::collections::HashMap;

use indexmap::IndexMap;
use log::warn;

/// Immutable mapping from master command names to their ordered chain
/// members.
///
/// Built once from the raw `chain_command` configuration; answers pure
/// queries afterwards. A master key stays in the table even when every one
/// of its configured members gets filtered out, so [`ChainRegistry::is_master`]
/// reflects the configuration while [`ChainRegistry::has_members`] reflects
/// actual membership.
#[derive(Debug, Default)]
pub struct ChainRegistry {
    chains: IndexMap<String, Vec<String>>,
}

impl ChainRegistry {
    #[must_use]
    pub fn new(config: &IndexMap<String, Vec<String>>) -> Self {
        let mut chains: IndexMap<String, Vec<String>> = IndexMap::new();
        for (master, members) in config {
            let entry = chains.entry(master.clone()).or_default();
            for member in members {
                // A chain must not contain its own master
                if member == master {
                    continue;
                }
                if member.trim().is_empty() {
                    warn!("Chain '{master}' lists a blank member name, skipping");
                    continue;
                }
                entry.push(member.clone());
            }
        }

        let registry = ChainRegistry { chains };
        registry.warn_shared_members();
        registry
    }

    /// A member claimed by more than one master keeps first-match semantics
    /// for [`ChainRegistry::master_of`], but the conflict is surfaced instead
    /// of silently resolved.
    fn warn_shared_members(&self) {
        let mut first_seen: HashMap<&str, &str> = HashMap::new();
        for (master, members) in &self.chains {
            for member in members {
                match first_seen.get(member.as_str()) {
                    Some(first) => warn!(
                        "{member} is listed in both {first} and {master} command chains; \
                         direct invocations report it as a member of {first}"
                    ),
                    None => {
                        first_seen.insert(member, master);
                    }
                }
            }
        }
    }

    /// Whether `name` appeared as a chain key in configuration, regardless of
    /// how many members survived filtering.
    #[must_use]
    pub fn is_master(&self, name: &str) -> bool {
        self.chains.contains_key(name)
    }

    /// Whether `name` has at least one member left after filtering.
    #[must_use]
    pub fn has_members(&self, name: &str) -> bool {
        self.chains.get(name).is_some_and(|members| !members.is_empty())
    }

    /// The ordered members of `name`'s chain, or an empty slice.
    #[must_use]
    pub fn members(&self, name: &str) -> &[String] {
        self.chains.get(name).map_or(&[], Vec::as_slice)
    }

    /// The first master (in configuration order) whose chain lists `member`.
    #[must_use]
    pub fn master_of(&self, member: &str) -> Option<&str> {
        if member.is_empty() {
            return None;
        }
        self.chains
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == member))
            .map(|(master, _)| master.as_str())
    }

    pub fn chains(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.chains
            .iter()
            .map(|(master, members)| (master.as_str(), members.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

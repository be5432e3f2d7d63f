use std::collections::HashMap;
use std::hash::Hash;

/// A journaled key-value map: a `current` view plus a stack of scope frames, each
/// recording the pre-image of every key first touched in that scope. Commit merges a
/// frame's pre-images up into its parent (so an ancestor rollback still has the right
/// restore value); rollback replays them directly onto `current`. Both are O(k) in the
/// size of the popped frame; there is no O(n) snapshot copy at `begin_scope`.
#[derive(Debug, Clone)]
pub struct JournaledMap<K, V> {
    current: HashMap<K, V>,
    scopes: Vec<HashMap<K, Option<V>>>,
}

impl<K, V> Default for JournaledMap<K, V> {
    fn default() -> Self {
        Self {
            current: HashMap::new(),
            scopes: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> JournaledMap<K, V> {
    pub fn get(&self, key: &K) -> Option<&V> {
        self.current.get(key)
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn record_preimage(&mut self, key: &K) {
        if let Some(scope) = self.scopes.last_mut() {
            if !scope.contains_key(key) {
                scope.insert(key.clone(), self.current.get(key).cloned());
            }
        }
    }

    pub fn set(&mut self, key: K, value: V) {
        self.record_preimage(&key);
        self.current.insert(key, value);
    }

    pub fn remove(&mut self, key: &K) {
        self.record_preimage(key);
        self.current.remove(key);
    }

    /// Merges the top scope's pre-images into its parent (or drops them if this was the
    /// outermost scope, since `current` already reflects the committed values).
    pub fn commit_scope(&mut self) {
        let Some(top) = self.scopes.pop() else {
            return;
        };
        if let Some(parent) = self.scopes.last_mut() {
            for (key, preimage) in top {
                parent.entry(key).or_insert(preimage);
            }
        }
    }

    /// Restores every key touched in the top scope to its pre-scope value, then drops the scope.
    pub fn rollback_scope(&mut self) {
        let Some(top) = self.scopes.pop() else {
            return;
        };
        for (key, preimage) in top {
            match preimage {
                Some(value) => {
                    self.current.insert(key, value);
                }
                None => {
                    self.current.remove(&key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollback_restores_preimage_across_nested_scopes() {
        let mut map: JournaledMap<&str, u64> = JournaledMap::default();
        map.set("x", 5);

        map.begin_scope();
        map.set("x", 6);
        map.set("y", 1);

        map.begin_scope();
        map.set("x", 9);
        map.set("y", 2);
        map.rollback_scope();

        assert_eq!(map.get(&"x"), Some(&6));
        assert_eq!(map.get(&"y"), Some(&1));

        map.commit_scope();
        assert_eq!(map.get(&"x"), Some(&6));
        assert_eq!(map.get(&"y"), Some(&1));
    }

    #[test]
    fn rollback_removes_key_created_inside_scope() {
        let mut map: JournaledMap<&str, u64> = JournaledMap::default();
        map.begin_scope();
        map.set("new", 1);
        map.rollback_scope();
        assert_eq!(map.get(&"new"), None);
    }
}

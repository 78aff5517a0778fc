//! Scope table: every namespace and class path seen in a translation unit,
//! interned so that all declarations of one class share a [`DeclGroupId`].

use std::collections::HashMap;

use unnest_core::DeclGroupId;

/// What a scope path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    Namespace,
    Class(DeclGroupId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub path: Vec<String>,
    pub kind: EntryKind,
}

impl Entry {
    pub const fn class_group(&self) -> Option<DeclGroupId> {
        match self.kind {
            EntryKind::Class(group) => Some(group),
            EntryKind::Namespace => None,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ScopeTable {
    entries: HashMap<String, Entry>,
    next_group: u32,
}

fn key(path: &[String]) -> String {
    path.join("::")
}

impl ScopeTable {
    /// Record a namespace and all of its enclosing namespaces.
    pub fn declare_namespace(&mut self, path: &[String]) {
        for depth in 1..=path.len() {
            let prefix = &path[..depth];
            self.entries.entry(key(prefix)).or_insert_with(|| Entry {
                path: prefix.to_vec(),
                kind: EntryKind::Namespace,
            });
        }
    }

    /// Intern a class path, returning its group. Redeclarations return the
    /// group of the first declaration.
    pub fn declare_class(&mut self, path: &[String]) -> DeclGroupId {
        if let Some(group) = self.get(path).and_then(Entry::class_group) {
            return group;
        }
        let group = DeclGroupId(self.next_group);
        self.next_group += 1;
        self.entries.insert(
            key(path),
            Entry {
                path: path.to_vec(),
                kind: EntryKind::Class(group),
            },
        );
        group
    }

    pub fn get(&self, path: &[String]) -> Option<&Entry> {
        self.entries.get(&key(path))
    }

    pub fn class_group(&self, path: &[String]) -> Option<DeclGroupId> {
        self.get(path).and_then(Entry::class_group)
    }

    /// `name` declared directly inside `parent`.
    pub fn child(&self, parent: &[String], name: &str) -> Option<&Entry> {
        let mut path = parent.to_vec();
        path.push(name.to_string());
        self.get(&path)
    }

    /// Unqualified lookup of `name` from `scope`, innermost scope first.
    pub fn lookup(&self, scope: &[String], name: &str) -> Option<&Entry> {
        (0..=scope.len())
            .rev()
            .find_map(|depth| self.child(&scope[..depth], name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Lexical position during a walk: the enclosing scope path plus the
/// template parameter names that hide outer declarations.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    pub path: Vec<String>,
    shadowed: Vec<String>,
}

impl Scope {
    pub fn nested(&self, segments: impl IntoIterator<Item = String>) -> Self {
        let mut path = self.path.clone();
        path.extend(segments);
        self.with_path(path)
    }

    pub fn with_path(&self, path: Vec<String>) -> Self {
        Self {
            path,
            shadowed: self.shadowed.clone(),
        }
    }

    pub fn shadow(&self, names: impl IntoIterator<Item = String>) -> Self {
        let mut shadowed = self.shadowed.clone();
        shadowed.extend(names);
        Self {
            path: self.path.clone(),
            shadowed,
        }
    }

    pub fn is_shadowed(&self, name: &str) -> bool {
        self.shadowed.iter().any(|s| s == name)
    }
}

use authors_app::Author;

/// Disposable local copy of the author list, keyed by id.
///
/// Order follows what the server returned, with new records appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorCache {
    entries: Vec<Author>,
}

impl AuthorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and take `authors` as the new contents.
    pub fn replace_all(&mut self, authors: Vec<Author>) {
        self.entries = authors;
    }

    /// Replace the entry with the same id, or append if there is none.
    pub fn merge(&mut self, author: Author) {
        match self.entries.iter_mut().find(|entry| entry.id == author.id) {
            Some(entry) => *entry = author,
            None => self.entries.push(author),
        }
    }

    pub fn evict(&mut self, id: i64) -> Option<Author> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: i64) -> Option<&Author> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Author> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Author] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use super::errors::DomainError;

/// A record kept in a [`Store`], addressable by its opaque string id.
pub trait Record: Clone + Send + 'static {
    /// Human-readable resource name used in error messages ("Dish", "Order").
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Error reported when no record matches `id`.
    fn not_found(id: &str) -> DomainError;
}

/// Ordered collection of records of one resource type.
pub trait Store<T: Record>: Send + 'static {
    fn all(&self) -> &[T];

    fn get_mut(&mut self, index: usize) -> Option<&mut T>;

    fn append(&mut self, record: T);

    fn remove_at(&mut self, index: usize) -> Option<T>;

    /// Position and record matching `id`, if any.
    fn find(&self, id: &str) -> Option<(usize, &T)> {
        self.all()
            .iter()
            .enumerate()
            .find(|(_, record)| record.id() == id)
    }
}

pub trait IdGenerator: Send + Sync + 'static {
    /// Returns an id that has not been handed out before.
    fn next_id(&self) -> String;
}

//! Column declarations and the process-wide schema cache.
//!
//! Record types declare their columns statically through [`RecordSchema`]
//! instead of being introspected at runtime. Each column binds an absolute
//! value index in the split line to a typed field, with the conversion
//! resolved once at declaration time rather than per field per line.

use crate::convert::{CustomField, EnumField, FieldConvert};
use crate::error::ConvertError;
use crate::record::FileRecord;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

/// Conversion dispatch kind for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Enum,
    Custom,
    Generic,
}

type Assign<T> = Box<dyn Fn(&mut T, &str) -> Result<(), ConvertError> + Send + Sync>;

/// One column binding: the absolute position of this column's value within a
/// split line, an optional default raw value substituted for blank segments,
/// and the conversion applied to the target field.
///
/// Declaration order of a type's columns need not match their value indexes.
pub struct ColumnSpec<T> {
    value_index: usize,
    name: &'static str,
    default_raw: Option<&'static str>,
    kind: FieldKind,
    assign: Assign<T>,
}

impl<T: FileRecord + 'static> ColumnSpec<T> {
    /// Bind an enum field. Accepts numeric ordinals or case-insensitive
    /// variant names; blank input is an invalid enum value.
    pub fn enumeration<E>(value_index: usize, name: &'static str, field: fn(&mut T) -> &mut E) -> Self
    where
        E: EnumField + 'static,
    {
        Self {
            value_index,
            name,
            default_raw: None,
            kind: FieldKind::Enum,
            assign: Box::new(move |record, raw| {
                *field(record) = E::parse_field(raw)?;
                Ok(())
            }),
        }
    }

    /// Bind a field of a type with its own parse routine.
    pub fn custom<C>(value_index: usize, name: &'static str, field: fn(&mut T) -> &mut C) -> Self
    where
        C: CustomField + 'static,
    {
        Self {
            value_index,
            name,
            default_raw: None,
            kind: FieldKind::Custom,
            assign: Box::new(move |record, raw| {
                *field(record) = C::parse(raw)?;
                Ok(())
            }),
        }
    }

    /// Bind a field through its registered string conversion.
    pub fn generic<V>(value_index: usize, name: &'static str, field: fn(&mut T) -> &mut V) -> Self
    where
        V: FieldConvert + 'static,
    {
        Self {
            value_index,
            name,
            default_raw: None,
            kind: FieldKind::Generic,
            assign: Box::new(move |record, raw| {
                *field(record) = V::convert(raw)?;
                Ok(())
            }),
        }
    }

    /// Raw value substituted when the segment at `value_index` is blank.
    pub fn with_default(mut self, raw: &'static str) -> Self {
        self.default_raw = Some(raw);
        self
    }

    pub fn value_index(&self) -> usize {
        self.value_index
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_raw(&self) -> Option<&'static str> {
        self.default_raw
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Convert `raw` and write the result into the record's field.
    pub fn assign(&self, record: &mut T, raw: &str) -> Result<(), ConvertError> {
        (self.assign)(record, raw)
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("value_index", &self.value_index)
            .field("name", &self.name)
            .field("default_raw", &self.default_raw)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The statically declared schema table each record type provides.
///
/// Built at most once per type via [`resolve`] and cached for the process
/// lifetime; safe for concurrent reads afterwards.
pub trait RecordSchema: FileRecord + 'static {
    fn columns() -> Vec<ColumnSpec<Self>>;
}

struct SchemaCache {
    by_type: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

static CACHE: OnceLock<SchemaCache> = OnceLock::new();

/// Resolve the cached column schema for `T`, building it on first use.
///
/// Concurrent first callers may race to build; the first insert wins and
/// every caller observes the same instance afterwards. A type that declares
/// zero columns resolves to an empty schema — the mapper reports that as a
/// per-record structural error, not a resolver failure.
pub fn resolve<T: RecordSchema>() -> Arc<Vec<ColumnSpec<T>>> {
    let cache = CACHE.get_or_init(|| SchemaCache {
        by_type: RwLock::new(HashMap::new()),
    });
    let key = TypeId::of::<T>();

    if let Some(entry) = cache.by_type.read().unwrap().get(&key) {
        return entry
            .clone()
            .downcast::<Vec<ColumnSpec<T>>>()
            .expect("schema cache entry has wrong type");
    }

    // Build outside the lock; losers of the race drop their copy.
    let built: Arc<Vec<ColumnSpec<T>>> = Arc::new(T::columns());
    let mut by_type = cache.by_type.write().unwrap();
    let entry = by_type.entry(key).or_insert_with(|| {
        let erased: Arc<dyn Any + Send + Sync> = built;
        erased
    });
    entry
        .clone()
        .downcast::<Vec<ColumnSpec<T>>>()
        .expect("schema cache entry has wrong type")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct SampleLine {
        index: usize,
        errors: Vec<String>,
        id: u32,
        label: String,
    }

    impl FileRecord for SampleLine {
        fn index(&self) -> usize {
            self.index
        }
        fn set_index(&mut self, index: usize) {
            self.index = index;
        }
        fn errors(&self) -> &[String] {
            &self.errors
        }
        fn push_error(&mut self, error: String) {
            self.errors.push(error);
        }
    }

    impl RecordSchema for SampleLine {
        fn columns() -> Vec<ColumnSpec<Self>> {
            vec![
                ColumnSpec::generic(0, "Id", |r| &mut r.id),
                ColumnSpec::generic(1, "Label", |r: &mut Self| &mut r.label).with_default("unknown"),
            ]
        }
    }

    #[derive(Debug, Default)]
    struct BareLine {
        index: usize,
        errors: Vec<String>,
    }

    impl FileRecord for BareLine {
        fn index(&self) -> usize {
            self.index
        }
        fn set_index(&mut self, index: usize) {
            self.index = index;
        }
        fn errors(&self) -> &[String] {
            &self.errors
        }
        fn push_error(&mut self, error: String) {
            self.errors.push(error);
        }
    }

    impl RecordSchema for BareLine {
        fn columns() -> Vec<ColumnSpec<Self>> {
            Vec::new()
        }
    }

    #[test]
    fn resolve_is_cached_per_type() {
        let first = resolve::<SampleLine>();
        let second = resolve::<SampleLine>();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn concurrent_resolve_yields_one_instance() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(resolve::<SampleLine>))
            .collect();
        let schemas: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for schema in &schemas[1..] {
            assert!(Arc::ptr_eq(&schemas[0], schema));
        }
    }

    #[test]
    fn zero_column_type_resolves_empty() {
        assert!(resolve::<BareLine>().is_empty());
    }

    #[test]
    fn column_spec_metadata() {
        let columns = SampleLine::columns();
        assert_eq!(columns[0].value_index(), 0);
        assert_eq!(columns[0].kind(), FieldKind::Generic);
        assert_eq!(columns[1].name(), "Label");
        assert_eq!(columns[1].default_raw(), Some("unknown"));
    }

    #[test]
    fn assign_writes_through_to_the_field() {
        let columns = SampleLine::columns();
        let mut record = SampleLine::default();
        columns[0].assign(&mut record, "42").unwrap();
        assert_eq!(record.id, 42);
        assert!(columns[0].assign(&mut record, "nope").is_err());
    }
}

//! Ordered validation chains.
//!
//! Each operation owns a [`Pipeline`]: a list of named steps that run in order
//! against a shared [`Context`]. A step receives the values derived so far and
//! either returns them (possibly augmented) or halts the whole chain with a
//! [`DomainError`]. The first halt wins; later steps never run.

pub mod dish;
pub mod order;

use serde_json::{Map, Number, Value};

use crate::domain::errors::DomainError;
use crate::domain::ports::{Record, Store};

/// The `data` object of a request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Anything other than a JSON object is treated as an empty payload.
    pub fn from_data(data: Value) -> Self {
        match data {
            Value::Object(fields) => Payload(fields),
            _ => Payload::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The field's value when it is truthy.
    pub fn present(&self, field: &str) -> Option<&Value> {
        self.get(field).filter(|value| is_truthy(value))
    }

    /// The field's value when it is a non-empty string.
    pub fn present_str(&self, field: &str) -> Option<&str> {
        self.present(field).and_then(Value::as_str)
    }
}

impl From<Value> for Payload {
    fn from(data: Value) -> Self {
        Payload::from_data(data)
    }
}

/// Absent, `null`, `false`, `0` and `""` count as missing.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A JSON number holding an integer greater than zero (`3` and `3.0` both count).
pub fn positive_integer(n: &Number) -> Option<u64> {
    if let Some(i) = n.as_u64() {
        return (i > 0).then_some(i);
    }
    n.as_f64()
        .filter(|f| *f > 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
        .map(|f| f as u64)
}

/// Everything a step may look at: the submitted payload, the route id (for
/// operations on an existing record) and the current collection.
pub struct Context<'a, R: Record> {
    pub payload: &'a Payload,
    pub route_id: Option<&'a str>,
    pub store: &'a dyn Store<R>,
}

impl<'a, R: Record> Context<'a, R> {
    pub fn new(
        payload: &'a Payload,
        route_id: Option<&'a str>,
        store: &'a dyn Store<R>,
    ) -> Self {
        Context {
            payload,
            route_id,
            store,
        }
    }

    /// The record located by [`resource_exists`].
    pub fn located<D>(&self, derived: &Derived<D>) -> Result<&'a R, DomainError> {
        let store = self.store;
        derived
            .position
            .and_then(|index| store.all().get(index))
            .ok_or_else(|| DomainError::internal("no record was located before this step"))
    }
}

/// Values derived by the steps that ran so far.
#[derive(Debug, Default)]
pub struct Derived<D> {
    /// Index of the record located by [`resource_exists`].
    pub position: Option<usize>,
    pub draft: D,
}

pub type Step<R, D> = fn(&Context<'_, R>, Derived<D>) -> Result<Derived<D>, DomainError>;

pub struct Pipeline<R: Record, D> {
    operation: &'static str,
    steps: Vec<(&'static str, Step<R, D>)>,
}

impl<R: Record, D: Default> Pipeline<R, D> {
    pub fn new(operation: &'static str) -> Self {
        Pipeline {
            operation,
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, name: &'static str, step: Step<R, D>) -> Self {
        self.steps.push((name, step));
        self
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|(name, _)| *name).collect()
    }

    pub fn run(&self, ctx: &Context<'_, R>) -> Result<Derived<D>, DomainError> {
        let mut derived = Derived::default();
        for (name, step) in &self.steps {
            derived = step(ctx, derived).inspect_err(|e| {
                log::debug!("{} halted at `{}`: {}", self.operation, name, e);
            })?;
        }
        Ok(derived)
    }
}

/// How an update treats a body id that disagrees with the route id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdMatchPolicy {
    /// Halt with a bad request.
    Enforce,
    /// Log a warning and keep going.
    Lenient,
}

/// Locates the record named by the route id.
pub fn resource_exists<R: Record, D>(
    ctx: &Context<'_, R>,
    mut derived: Derived<D>,
) -> Result<Derived<D>, DomainError> {
    let id = ctx
        .route_id
        .ok_or_else(|| DomainError::internal("lookup requires a route id"))?;
    match ctx.store.find(id) {
        Some((index, _)) => {
            derived.position = Some(index);
            Ok(derived)
        }
        None => Err(R::not_found(id)),
    }
}

/// Describes a body id that disagrees with the route id, if there is one.
fn id_mismatch<R: Record>(ctx: &Context<'_, R>) -> Option<String> {
    let submitted = ctx.payload.present("id")?;
    let route_id = ctx.route_id.unwrap_or_default();
    if submitted.as_str() == Some(route_id) {
        return None;
    }
    let submitted = match submitted {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(format!(
        "{kind} id does not match route id. {kind}: {submitted}, Route: {route_id}",
        kind = R::KIND
    ))
}

pub fn match_id<R: Record, D>(
    ctx: &Context<'_, R>,
    derived: Derived<D>,
) -> Result<Derived<D>, DomainError> {
    match id_mismatch(ctx) {
        Some(message) => Err(DomainError::BadRequest(message)),
        None => Ok(derived),
    }
}

pub fn match_id_lenient<R: Record, D>(
    ctx: &Context<'_, R>,
    derived: Derived<D>,
) -> Result<Derived<D>, DomainError> {
    if let Some(message) = id_mismatch(ctx) {
        log::warn!("ignoring id mismatch: {}", message);
    }
    Ok(derived)
}

/// Unwraps a draft field that an earlier step should have filled in.
pub(crate) fn derived_field<T>(value: Option<T>, field: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::internal(format!("`{}` was not derived", field)))
}

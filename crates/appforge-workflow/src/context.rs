//! Per-run execution context.
//!
//! An [`ExecutionContext`] carries everything a workflow can read: the form
//! data that triggered it, the current record, and session variables.
//! Actions reference this data through `{path.to.value}` tokens in their
//! config; [`ExecutionContext::resolve_value`] expands them before a handler
//! touches the config.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

/// The data a workflow run executes against.
///
/// Bare lookup paths are resolved against variables first, then form data,
/// then the current record; the `variables.`, `form.`, and `record.`
/// prefixes address one source explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
    /// The application this run belongs to.
    pub app_id: String,
    /// Acting user, when the host knows one.
    pub user_id: Option<String>,
    /// Entity the trigger concerned.
    pub entity: Option<String>,
    /// Record the trigger concerned.
    pub record_id: Option<String>,
    /// Submitted form data.
    pub form: Map<String, Value>,
    /// Current record data.
    pub record: Map<String, Value>,
    /// Session variables.  Actions may write these mid-run.
    pub variables: Map<String, Value>,
}

impl ExecutionContext {
    /// Context for an app with nothing else bound.
    pub fn for_app(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Self::default()
        }
    }

    /// Attach the acting user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Bind the triggering entity.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Bind the triggering record id.
    pub fn with_record_id(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    /// Attach form data (ignored unless it is a JSON object).
    pub fn with_form(mut self, form: Value) -> Self {
        if let Value::Object(map) = form {
            self.form = map;
        }
        self
    }

    /// Attach current record data (ignored unless it is a JSON object).
    pub fn with_record(mut self, record: Value) -> Self {
        if let Value::Object(map) = record {
            self.record = map;
        }
        self
    }

    /// Set one variable.
    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Resolve a dotted path against the merged context view.
    ///
    /// `form`, `record`, and `variables` alone yield the whole source as an
    /// object, which is how `"data": "{form}"` configs capture a submission.
    pub fn lookup(&self, path: &str) -> Option<Value> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }

        if let Some(rest) = path.strip_prefix("form.") {
            return walk(&self.form, rest);
        }
        if let Some(rest) = path.strip_prefix("record.") {
            return walk(&self.record, rest);
        }
        if let Some(rest) = path.strip_prefix("variables.") {
            return walk(&self.variables, rest);
        }
        match path {
            "form" => return Some(Value::Object(self.form.clone())),
            "record" => return Some(Value::Object(self.record.clone())),
            "variables" => return Some(Value::Object(self.variables.clone())),
            _ => {}
        }

        walk(&self.variables, path)
            .or_else(|| walk(&self.form, path))
            .or_else(|| walk(&self.record, path))
    }

    /// Replace `{path.to.value}` tokens in a template.  Unresolved tokens
    /// are left as literal text.
    pub fn interpolate(&self, template: &str) -> String {
        token_pattern()
            .replace_all(template, |caps: &regex::Captures<'_>| {
                match self.lookup(&caps[1]) {
                    Some(value) => render(&value),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Expand tokens in an arbitrary config value.
    ///
    /// A string that is exactly one token resolves to the referenced value
    /// with its type intact; mixed strings interpolate to text; arrays and
    /// objects recurse.
    pub fn resolve_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => match exact_token(s) {
                Some(path) => self
                    .lookup(path)
                    .unwrap_or_else(|| Value::String(s.clone())),
                None => Value::String(self.interpolate(s)),
            },
            Value::Array(items) => {
                Value::Array(items.iter().map(|v| self.resolve_value(v)).collect())
            }
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.resolve_value(v)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

/// Walk a dotted path through nested objects.
fn walk(root: &Map<String, Value>, path: &str) -> Option<Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = root.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current.clone())
}

/// The whole string is a single `{path}` token.
fn exact_token(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;
    let valid = !inner.is_empty()
        && inner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    valid.then_some(inner)
}

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_.]+)\}").expect("token pattern compiles"))
}

/// Text form of a value for message interpolation.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> ExecutionContext {
        ExecutionContext::for_app("app-1")
            .with_form(json!({ "name": "Ada", "total": 42 }))
            .with_record(json!({ "name": "Old", "status": "draft" }))
            .with_variable("user", json!({ "name": "Grace" }))
    }

    #[test]
    fn bare_paths_prefer_variables_then_form_then_record() {
        let ctx = ctx();
        assert_eq!(ctx.lookup("user.name"), Some(json!("Grace")));
        assert_eq!(ctx.lookup("name"), Some(json!("Ada")));
        assert_eq!(ctx.lookup("status"), Some(json!("draft")));
        assert_eq!(ctx.lookup("record.name"), Some(json!("Old")));
        assert_eq!(ctx.lookup("missing"), None);
    }

    #[test]
    fn interpolation_leaves_unresolved_tokens_literal() {
        let ctx = ctx();
        assert_eq!(ctx.interpolate("Hi {user.name}"), "Hi Grace");
        assert_eq!(ctx.interpolate("Total: {total}"), "Total: 42");
        assert_eq!(ctx.interpolate("Hi {ghost.name}"), "Hi {ghost.name}");
    }

    #[test]
    fn exact_tokens_keep_their_value_type() {
        let ctx = ctx();
        assert_eq!(
            ctx.resolve_value(&json!("{form}")),
            json!({ "name": "Ada", "total": 42 })
        );
        assert_eq!(ctx.resolve_value(&json!("{total}")), json!(42));
        assert_eq!(
            ctx.resolve_value(&json!({ "greeting": "Hi {user.name}" })),
            json!({ "greeting": "Hi Grace" })
        );
    }

    #[test]
    fn unresolved_exact_token_stays_a_string() {
        let ctx = ctx();
        assert_eq!(ctx.resolve_value(&json!("{ghost}")), json!("{ghost}"));
    }
}

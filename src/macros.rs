/// Builds a [`Record`](crate::Record) from `key => value` pairs.
///
/// Values go through [`Value::from`](crate::Value), and the bare word `null`
/// stands for [`Value::Null`](crate::Value::Null). Negative numbers and other
/// multi-token values need parentheses.
///
/// ```rust
/// use serde_dsv::{record, Value};
///
/// let row = record! { "id" => 1, "name" => "Alice", "score" => (-2.5), "note" => null };
/// assert_eq!(row.get("name").and_then(|v| v.as_str()), Some("Alice"));
/// assert_eq!(row.get("note"), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! record {
    (@value null) => {
        $crate::Value::Null
    };

    (@value $value:expr) => {
        $crate::Value::from($value)
    };

    () => {
        $crate::Record::new()
    };

    ($($key:literal => $value:tt),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert(::std::string::String::from($key), $crate::record!(@value $value));
        )+
        record
    }};
}

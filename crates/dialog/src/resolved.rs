use hrmate_core::DialogResponse;

/// Either the value a step needed, or the reply that should go out instead
/// because the dialog has to pause (elicit a slot, report a dead end).
pub enum Resolved<T> {
    Value(T),
    Reply(DialogResponse),
}

/// Unwraps a [`Resolved`], early-returning the reply from the enclosing
/// handler when the step produced one.
macro_rules! resolve {
    ($expr:expr) => {
        match $expr {
            $crate::resolved::Resolved::Value(value) => value,
            $crate::resolved::Resolved::Reply(reply) => return Ok(reply),
        }
    };
}

pub(crate) use resolve;

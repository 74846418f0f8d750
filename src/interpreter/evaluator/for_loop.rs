use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        dispatch::Dispatch,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a `for` comprehension.
    ///
    /// The iterable must evaluate to an array, a string (walked character by
    /// character) or a range. For each element a fresh scope binds the loop
    /// variable; the guard, if any, is evaluated in that scope and skips the
    /// element when falsy, otherwise the body's value is collected.
    /// Assignments inside the guard or body bind in the iteration scope and
    /// vanish with it.
    ///
    /// # Returns
    /// An array with one body value per element that passed the guard.
    ///
    /// # Errors
    /// - `TypeMismatch` if the iterable is not a sequence.
    /// - Any error raised by the guard or the body.
    ///
    /// # Example
    /// ```
    /// use reckon::{evaluate, interpreter::evaluator::core::ExecutionContext, parse};
    ///
    /// let tree = parse("for x in 1..=6 when x % 2 == 0 then x * 10").unwrap();
    /// let value = evaluate(&tree, &ExecutionContext::new()).unwrap();
    /// assert_eq!(value.to_string(), "[20, 40, 60]");
    /// ```
    pub fn eval_for(&mut self,
                    variable: &str,
                    iterable: &Node,
                    guard: Option<&Node>,
                    body: &Node)
                    -> EvalResult<Value> {
        let iterable = self.recurse(iterable)?;
        let elements = iterable.elements().ok_or_else(|| {
                                              RuntimeError::type_mismatch("for",
                                                                          format!("cannot iterate over a {}",
                                                                                  iterable.type_name()))
                                          })?;

        let mut results = Vec::with_capacity(iterable.len().unwrap_or(0).min(1024));
        for element in elements {
            let collected = self.with_scope(variable, element, |interpreter| {
                                    if let Some(guard) = guard
                                       && !interpreter.recurse(guard)?.is_truthy()
                                    {
                                        return Ok(None);
                                    }
                                    interpreter.recurse(body).map(Some)
                                })?;
            results.extend(collected);
        }

        Ok(Value::from(results))
    }
}

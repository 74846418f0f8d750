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
    /// Evaluates a function call.
    ///
    /// The callee is resolved before any argument is evaluated, so calling an
    /// unknown name fails without side effects. Arguments are then evaluated
    /// left to right and passed to the host function, whose error, if any, is
    /// returned unchanged.
    ///
    /// # Errors
    /// - `NotCallable` if `name` is bound to a variable but not to a function.
    /// - `UnknownFunction` if `name` is not bound at all.
    /// - Any error raised by an argument or the function itself.
    pub fn eval_call(&mut self, name: &str, args: &[Node]) -> EvalResult<Value> {
        let Some(function) = self.context.functions.get(name).cloned() else {
            if self.get_variable(name).is_some() {
                return Err(RuntimeError::NotCallable { name: name.to_string() });
            }
            return Err(RuntimeError::UnknownFunction { name: name.to_string() });
        };

        let values = args.iter()
                         .map(|arg| self.recurse(arg))
                         .collect::<EvalResult<Vec<_>>>()?;
        function(&values)
    }
}

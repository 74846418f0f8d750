use std::collections::{HashMap, HashSet};

use log::trace;

use crate::ast::Node;

/// Removes assignments whose name no later statement reads.
///
/// The statements are walked from last to first while tracking the set of
/// live names. The last statement is the program's result and is always
/// kept. An earlier assignment is kept only if its name is live or its value
/// assigns another name, as in `x = y = 3`, and only a kept assignment
/// contributes the names its value reads. Any other statement is kept and
/// contributes every name it reads.
///
/// # Example
/// ```
/// use reckon::{
///     ast::build::{assign, identifier, number},
///     interpreter::optimizer::liveness::eliminate_dead_statements,
/// };
///
/// let statements = vec![assign("a", number(1.0)),
///                       assign("b", number(2.0)),
///                       identifier("b")];
///
/// assert_eq!(eliminate_dead_statements(statements),
///            vec![assign("b", number(2.0)), identifier("b")]);
/// ```
#[must_use]
pub fn eliminate_dead_statements(statements: Vec<Node>) -> Vec<Node> {
    let last = statements.len().saturating_sub(1);
    let mut live = HashSet::new();
    let mut kept = Vec::with_capacity(statements.len());

    for (position, statement) in statements.into_iter().enumerate().rev() {
        if position != last
           && let Node::Assignment { name, value } = &statement
        {
            if !live.contains(name) && !assigns_anything(value) {
                trace!("dropped dead assignment to '{name}'");
                continue;
            }
            value.collect_identifiers(&mut live);
            kept.push(statement);
            continue;
        }
        statement.collect_identifiers(&mut live);
        kept.push(statement);
    }

    kept.reverse();
    kept
}

/// Whether evaluating `node` may bind a name.
fn assigns_anything(node: &Node) -> bool {
    let mut targets = HashMap::new();
    node.count_assignments(&mut targets);
    !targets.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::{array, assign, identifier, number};

    #[test]
    fn keeps_chained_assignments() {
        let statements = vec![assign("x", assign("y", number(3.0))), identifier("y")];
        assert_eq!(eliminate_dead_statements(statements.clone()), statements);
    }

    #[test]
    fn nested_assignments_keep_what_they_read() {
        let statements = vec![assign("n", number(1.0)),
                              assign("b", array(vec![assign("a", identifier("n"))])),
                              identifier("a")];
        assert_eq!(eliminate_dead_statements(statements.clone()), statements);
    }
}

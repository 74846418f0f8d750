#![allow(dead_code)]

use proptest::{prelude::*, strategy::Union};
use reckon::ast::{
    BinaryOperator, Node, UnaryOperator,
    build::{array, assign, binary, boolean, call, for_each, identifier, if_else, index, number, range, string},
};

pub fn name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "x", "total"]).prop_map(String::from)
}

/// Expression trees without `Program` nodes or negative number literals,
/// which are exactly the trees that parse back unchanged.
pub fn expression() -> BoxedStrategy<Node> {
    tree(true)
}

/// Like [`expression`] but without ranges, so every `for` walks a short
/// sequence and evaluation stays fast.
pub fn bounded_expression() -> BoxedStrategy<Node> {
    tree(false)
}

fn tree(ranges: bool) -> BoxedStrategy<Node> {
    let leaf = prop_oneof![prop::sample::select(vec![0.0, 0.5, 1.0, 2.0, 10.0, 123.25]).prop_map(number),
                           "[a-z \"\\\\\n\t]{0,4}".prop_map(string),
                           any::<bool>().prop_map(boolean),
                           name().prop_map(identifier),];

    leaf.prop_recursive(4, 32, 3, move |inner| {
            let mut arms = vec![
                (inner.clone(), prop::sample::select(BinaryOperator::ALL.to_vec()), inner.clone())
                    .prop_map(|(l, op, r)| binary(l, op, r))
                    .boxed(),
                (prop::sample::select(vec![UnaryOperator::Negate, UnaryOperator::Not]), inner.clone())
                    .prop_map(|(op, argument)| Node::UnaryOp { op,
                                                               argument: Box::new(argument) })
                    .boxed(),
                prop::collection::vec(inner.clone(), 0..3).prop_map(array).boxed(),
                (prop::sample::select(vec!["f", "g"]), prop::collection::vec(inner.clone(), 0..3))
                    .prop_map(|(f, args)| call(f, args))
                    .boxed(),
                (name(), inner.clone()).prop_map(|(n, value)| assign(n, value)).boxed(),
                (inner.clone(), inner.clone(), inner.clone()).prop_map(|(c, a, b)| if_else(c, a, b)).boxed(),
                (name(), inner.clone(), prop::option::of(inner.clone()), inner.clone())
                    .prop_map(|(v, it, guard, body)| for_each(v, it, guard, body))
                    .boxed(),
                (inner.clone(), inner.clone()).prop_map(|(o, i)| index(o, i)).boxed(),
            ];
            if ranges {
                arms.push((inner.clone(), inner, any::<bool>())
                    .prop_map(|(s, e, inclusive)| range(s, e, inclusive))
                    .boxed());
            }
            Union::new(arms)
        })
        .boxed()
}

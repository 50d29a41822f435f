//! Collection of the expressions reachable from a formatting tree.

use crate::ast::Expression;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Every distinct expression instance found in a tree, in discovery order.
///
/// Identity is by allocation: two nodes sharing one `Arc` count once, while two
/// separately parsed copies of the same source count twice.
#[derive(Debug, Clone, Default)]
pub struct ExpressionSet {
    expressions: Vec<Arc<Expression>>,
}

impl ExpressionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `expr`, returning `false` if this exact instance was already present.
    pub fn insert(&mut self, expr: &Arc<Expression>) -> bool {
        if self.expressions.iter().any(|e| Arc::ptr_eq(e, expr)) {
            return false;
        }
        self.expressions.push(Arc::clone(expr));
        true
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Expression>> {
        self.expressions.iter()
    }

    /// The feature attributes any collected expression reads. A data source can
    /// use this to fetch only the columns the labels need.
    pub fn attribute_names(&self) -> BTreeSet<String> {
        self.collect_names(|e| match e {
            Expression::Attribute(name) => Some(name),
            _ => None,
        })
    }

    /// The `@variables` any collected expression reads.
    pub fn variable_names(&self) -> BTreeSet<String> {
        self.collect_names(|e| match e {
            Expression::Variable(name) => Some(name),
            _ => None,
        })
    }

    fn collect_names(&self, pick: impl Fn(&Expression) -> Option<&String>) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for expr in &self.expressions {
            expr.walk(&mut |e| {
                if let Some(name) = pick(e) {
                    names.insert(name.clone());
                }
            });
        }
        names
    }
}

impl<'s> IntoIterator for &'s ExpressionSet {
    type Item = &'s Arc<Expression>;
    type IntoIter = std::slice::Iter<'s, Arc<Expression>>;

    fn into_iter(self) -> Self::IntoIter {
        self.expressions.iter()
    }
}

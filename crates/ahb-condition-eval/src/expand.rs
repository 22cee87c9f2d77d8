//! Package expander (spec §4.5, C5): iterative substitution of
//! package-key leaves until a fix point, with per-chain cycle detection
//! (spec §9: "no pointers; the expander keeps a visited-set of keys
//! along the current expansion chain").

use crate::context::EvaluationContext;
use crate::error::Error;
use crate::traits::PackageResolver;
use ahb_condition_core::key::{self, KeyKind};
use ahb_condition_core::Tree;
use futures::future::BoxFuture;
use std::collections::HashSet;

/// Expands every package-key leaf in `tree`, recursively, until none
/// remain. Returns a fresh tree; `tree` itself is never mutated (spec §3
/// "Lifecycle").
pub async fn expand(
    tree: &Tree,
    resolver: &dyn PackageResolver,
    ctx: &EvaluationContext,
) -> Result<Tree, Error> {
    expand_node(tree.clone(), resolver, ctx, HashSet::new()).await
}

fn expand_node<'a>(
    tree: Tree,
    resolver: &'a dyn PackageResolver,
    ctx: &'a EvaluationContext,
    visited: HashSet<String>,
) -> BoxFuture<'a, Result<Tree, Error>> {
    Box::pin(async move {
        ctx.cancellation().check()?;
        match tree {
            Tree::Leaf(leaf_key) => {
                if key::classify(&leaf_key) != KeyKind::Package {
                    return Ok(Tree::Leaf(leaf_key));
                }
                if visited.contains(&leaf_key) {
                    let mut key_path: Vec<String> = visited.into_iter().collect();
                    key_path.sort();
                    key_path.push(leaf_key);
                    return Err(Error::PackageCycle { key_path });
                }
                let resolved = resolver.resolve(&leaf_key, ctx).await?;
                let expr_src =
                    resolved.ok_or_else(|| Error::UnknownPackage { key: leaf_key.clone() })?;
                let parsed = ahb_condition_parser::parse_condition_expression(&expr_src)
                    .map_err(Error::from_syntax)?;
                let mut next_visited = visited;
                next_visited.insert(leaf_key);
                expand_node(parsed, resolver, ctx, next_visited).await
            }
            Tree::Composition { kind, left, right } => {
                let left = expand_node(*left, resolver, ctx, visited.clone()).await?;
                let right = expand_node(*right, resolver, ctx, visited).await?;
                Ok(Tree::compose(kind, left, right))
            }
        }
    })
}

//! Overload selection shared by operations and functions.
//!
//! A candidate matches when every argument datatype either equals the
//! parameter datatype or converts to it with one registered conversion.
//! Its cost is the number of converted arguments. The unique candidate with
//! the lowest cost wins; several at the lowest cost are ambiguous. An exact
//! match has cost zero and therefore always beats converted ones.

use crate::conversion::{Conversion, ConversionTable};
use faktorips_fl_ast::Datatype;
use std::sync::Arc;

/// Per-argument conversion, `None` where the argument matches as is.
pub type ArgConversions = Vec<Option<Arc<dyn Conversion>>>;

/// Outcome of overload selection.
#[derive(Debug)]
pub enum Selection<T> {
    /// Exactly one cheapest candidate
    Unique { item: T, conversions: ArgConversions },
    /// Several candidates tie at the lowest cost
    Ambiguous(Vec<T>),
    /// No candidate accepts the arguments
    NoMatch,
}

/// Conversions needed to pass `args` as `params`, or `None` if impossible.
pub fn match_params(
    args: &[Datatype],
    params: &[Datatype],
    conversions: &ConversionTable,
) -> Option<ArgConversions> {
    if args.len() != params.len() {
        return None;
    }
    args.iter()
        .zip(params)
        .map(|(arg, param)| {
            if arg == param {
                Some(None)
            } else {
                conversions.find(arg, param).map(Some)
            }
        })
        .collect()
}

/// Select the cheapest candidate for `args`.
///
/// # Parameters
///
/// - `candidates`: items with their parameter datatypes
/// - `args`: argument datatypes
/// - `conversions`: implicit conversions available
pub fn select<T, I>(candidates: I, args: &[Datatype], conversions: &ConversionTable) -> Selection<T>
where
    I: IntoIterator<Item = (T, Vec<Datatype>)>,
{
    let mut best_cost = usize::MAX;
    let mut best: Vec<(T, ArgConversions)> = Vec::new();

    for (item, params) in candidates {
        let Some(arg_conversions) = match_params(args, &params, conversions) else {
            continue;
        };
        let cost = arg_conversions.iter().filter(|c| c.is_some()).count();
        if cost < best_cost {
            best_cost = cost;
            best.clear();
        }
        if cost == best_cost {
            best.push((item, arg_conversions));
        }
    }

    match best.len() {
        0 => Selection::NoMatch,
        1 => {
            let (item, conversions) = best.remove(0);
            Selection::Unique { item, conversions }
        }
        _ => Selection::Ambiguous(best.into_iter().map(|(item, _)| item).collect()),
    }
}

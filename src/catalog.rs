//! Signal catalog: filtering and projection of resolved variables.
//!
//! The catalog is the upstream-facing view of an enumeration: every
//! resolved [`VariableInfo`] whose type can actually be read is projected
//! into a flat [`Signal`] record ready for JSON emission. Structures,
//! abbreviated structures and unrecognized types never appear in the
//! output; for arrays the same filter applies to the element type.
//!
//! # Example
//!
//! ```
//! use omron_cip::{build_signals, DataType, VariableInfo};
//!
//! let vars = vec![
//!     VariableInfo {
//!         name: "Counter".into(),
//!         data_type: DataType::Dint,
//!         size: 4,
//!         array_info: None,
//!     },
//!     VariableInfo {
//!         name: "Recipe".into(),
//!         data_type: DataType::Structure,
//!         size: 64,
//!         array_info: None,
//!     },
//! ];
//!
//! let signals = build_signals(&vars);
//! assert_eq!(signals.len(), 1);
//! assert_eq!(signals[0].name, "Counter");
//! assert_eq!(signals[0].data_type, "DINT");
//! ```

use serde::Serialize;

use crate::variable::{DataType, VariableInfo};

/// One catalog entry.
///
/// Serializes as `{"name": …, "type": …}` with an `arrayDimensions` field
/// only for arrays. `type` carries the scalar spelling (for arrays, the
/// element type); dimensions are `[start, start + length]` half-open pairs,
/// one per axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    /// Variable name.
    pub name: String,
    /// Scalar type spelling, e.g. `DINT`.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Per-dimension `[start, end)` bounds, arrays only.
    #[serde(rename = "arrayDimensions", skip_serializing_if = "Option::is_none")]
    pub array_dimensions: Option<Vec<[u32; 2]>>,
}

/// Returns whether a data type belongs in the catalog.
///
/// Unrecognized values and both structure forms do not; their members
/// cannot be read through this library.
pub fn is_listable(data_type: DataType) -> bool {
    if !data_type.is_valid() {
        return false;
    }
    !matches!(
        data_type,
        DataType::Structure | DataType::AbbreviatedStructure
    )
}

/// Projects resolved variables into catalog records, preserving order.
pub fn build_signals(vars: &[VariableInfo]) -> Vec<Signal> {
    let mut signals = Vec::with_capacity(vars.len());
    for var in vars {
        if !is_listable(var.data_type) {
            continue;
        }
        match &var.array_info {
            None => signals.push(Signal {
                name: var.name.clone(),
                data_type: var.data_type.to_string(),
                array_dimensions: None,
            }),
            Some(info) => {
                if !is_listable(info.element_type) {
                    continue;
                }
                let dimensions = info
                    .start_indices
                    .iter()
                    .zip(&info.dimensions)
                    .map(|(&start, &length)| [start, start + length])
                    .collect();
                signals.push(Signal {
                    name: var.name.clone(),
                    data_type: info.element_type.to_string(),
                    array_dimensions: Some(dimensions),
                });
            }
        }
    }
    signals
}

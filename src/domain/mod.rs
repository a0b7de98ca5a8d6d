//! Value types of the router domain.
//!
//! Amounts, shares, assets, pairs, paths, deadlines and quote results.
//! All types are newtypes with validated constructors.

mod amount;
mod amounts_query;
mod asset;
mod asset_pair;
mod basis_points;
mod deadline;
mod fee_tier;
mod liquidity;
mod rounding;
mod swap_path;

pub use amount::Amount;
pub use amounts_query::{AmountsIn, AmountsOut};
pub use asset::Asset;
pub use asset_pair::AssetPair;
pub use basis_points::BasisPoints;
pub use deadline::Deadline;
pub use fee_tier::FeeTier;
pub use liquidity::Liquidity;
pub use rounding::Rounding;
pub use swap_path::SwapPath;

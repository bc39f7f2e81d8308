// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Configuration for shielded contract interaction: the chain profile
//! (RPC endpoint, chain id, gas ceiling) and the persisted registry of
//! deployed contract addresses. The client core consumes plain values
//! from here and has no opinion on where they are stored.

mod chain;
mod registry;
pub mod rpc;

pub use chain::{ChainConfig, DEFAULT_GAS_LIMIT};
pub use registry::AddressBook;
pub use rpc::{Rpc, RpcAuth};

// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View configuration errors.

use alloc::string::String;

use thiserror::Error;

/// Configuration errors raised while rendering or composing views.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    /// A sub-view slot was declared without a view type.
    #[error("sub-view `{outlet}` has no view type")]
    MissingViewType {
        /// Outlet name of the offending slot.
        outlet: String,
    },

    /// A region name that was never added.
    #[error("unknown region: {name}")]
    UnknownRegion {
        /// Requested region name.
        name: String,
    },
}

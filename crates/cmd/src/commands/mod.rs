// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod cat;
pub mod list;
pub mod stat;

pub use cat::cat_command;
pub use list::list_command;
pub use stat::stat_command;

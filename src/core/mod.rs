// SPDX-License-Identifier: GPL-3.0-only

pub mod api;
pub mod media;
pub mod records;
pub mod roster_cache;
pub mod storage;

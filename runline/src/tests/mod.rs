// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_align;
mod test_analysis;
mod utils;

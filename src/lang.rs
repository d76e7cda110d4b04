/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * Built-in Grammar Fragments
 *
 * Everything in this module is plain configuration of the engine's
 * public extension API: the fragments below are assembled exclusively
 * out of the builder functions in `language::builders` and have no
 * privileged access to engine internals. A host embedding the engine
 * can compose, extend or replace any of them.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawx-eval
 *
 * License:
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

pub mod arithmetic;
pub mod base;
pub mod bitmask;
pub mod full;
pub mod json;
pub mod logic;
pub mod text;

pub use arithmetic::arithmetic;
pub use base::base;
pub use bitmask::bitmask;
pub use full::{full, full_with};
pub use json::json;
pub use logic::propositional_logic;
pub use text::text;

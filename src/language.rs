/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * Grammar Model and Composition
 *
 * This module defines the immutable `Language` grammar table, the
 * operator definitions it holds, and the builder functions used by
 * configuration code (and by hosts) to assemble grammars out of
 * composable fragments.
 *
 * The implementation is split across:
 * - `grammar.rs`   → The Language table, compose(), compile()/evaluate()
 * - `operator.rs`  → Operator variants, merging and runtime dispatch
 * - `builders.rs`  → Public single-fragment constructors
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

pub mod builders;
pub mod grammar;
pub mod operator;

pub use builders::Resolution;
pub use grammar::{Language, PrefixKey, PrefixRule, VariableSelector};
pub use operator::Assoc;

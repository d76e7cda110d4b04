/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * Expression Parser
 *
 * The parsing implementation is split across two modules:
 * - `parser.rs`       → Parser state, token cursor, camouflage protocol,
 *                       argument-list and error helpers
 * - `expressions.rs`  → Precedence-climbing expression grammar
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

pub mod expressions;
pub mod parser;

pub use parser::Parser;

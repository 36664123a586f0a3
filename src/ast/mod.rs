/// AST (Abstract Syntax Tree) module
/// Contains the syntax tree handed to the checker by the parser
///
/// Submodules:
/// - ast: Program, declaration, statement and expression node enums
/// - expressions: Expression payloads, operators and builders
/// - statements: Statement and declaration payloads and builders
/// - types: The type values and their convertibility relation
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

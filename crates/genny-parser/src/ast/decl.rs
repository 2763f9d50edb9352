//! Declaration AST nodes for Go source files.
//!
//! A [`SourceFile`] holds the package clause and the top-level declarations:
//! `import`, `const`, `var`, `type` groups and `func` declarations.
//! Function bodies and value initializers are checked for balanced
//! delimiters but not represented.

use crate::ast::types::{Ident, Param, Signature, TypeExpr, TypeParam};
use crate::lexer::Span;

/// A parsed Go source file.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'ast> {
    pub package: Ident<'ast>,
    pub decls: &'ast [Decl<'ast>],
    pub span: Span,
}

impl<'ast> SourceFile<'ast> {
    /// All import specs, in source order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec<'ast>> + '_ {
        self.specs().filter_map(|spec| match spec {
            Spec::Import(import) => Some(import),
            _ => None,
        })
    }

    /// All top-level type specs, grouped or not, in source order.
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec<'ast>> + '_ {
        self.specs().filter_map(|spec| match spec {
            Spec::Type(ty) => Some(ty),
            _ => None,
        })
    }

    pub fn funcs(&self) -> impl Iterator<Item = &FuncDecl<'ast>> + '_ {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            Decl::Gen(_) => None,
        })
    }

    fn specs(&self) -> impl Iterator<Item = &Spec<'ast>> + '_ {
        self.decls
            .iter()
            .filter_map(|decl| match decl {
                Decl::Gen(group) => Some(group.specs.iter()),
                Decl::Func(_) => None,
            })
            .flatten()
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decl<'ast> {
    /// `import`, `const`, `var` or `type`, grouped or single.
    Gen(GenDecl<'ast>),
    Func(FuncDecl<'ast>),
}

impl Decl<'_> {
    pub fn span(&self) -> Span {
        match self {
            Decl::Gen(group) => group.span,
            Decl::Func(func) => func.span,
        }
    }
}

/// The keyword introducing a [`GenDecl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKeyword {
    Import,
    Const,
    Var,
    Type,
}

/// A generic declaration: `type X int` or `type ( X int; Y string )`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenDecl<'ast> {
    pub keyword: DeclKeyword,
    /// Whether the specs were written inside parentheses.
    pub grouped: bool,
    pub specs: &'ast [Spec<'ast>],
    pub span: Span,
}

/// One spec inside a [`GenDecl`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spec<'ast> {
    Import(ImportSpec<'ast>),
    Type(TypeSpec<'ast>),
    Value(ValueSpec<'ast>),
}

/// `import name "path"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportSpec<'ast> {
    /// Local name, `.` or `_`.
    pub name: Option<Ident<'ast>>,
    /// The quoted import path as written.
    pub path: &'ast str,
    pub span: Span,
}

/// `Name[TypeParams] Type` or `Name = Type`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeSpec<'ast> {
    pub name: Ident<'ast>,
    pub type_params: &'ast [TypeParam<'ast>],
    /// Alias declaration (`type A = B`).
    pub alias: bool,
    pub ty: TypeExpr<'ast>,
    pub span: Span,
}

/// `a, b Type = x, y` inside `const` or `var`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueSpec<'ast> {
    pub names: &'ast [Ident<'ast>],
    pub ty: Option<TypeExpr<'ast>>,
    pub has_values: bool,
    pub span: Span,
}

/// `func (recv) Name[T any](params) results { body }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuncDecl<'ast> {
    pub receiver: Option<Param<'ast>>,
    pub name: Ident<'ast>,
    pub signature: Signature<'ast>,
    /// False for declarations implemented outside Go (no body).
    pub has_body: bool,
    pub span: Span,
}

impl FuncDecl<'_> {
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::NamedType;

    #[test]
    fn source_file_iterators() {
        let int = TypeExpr::Named(NamedType {
            package: None,
            name: Ident::new("int", Span::new(2, 8, 3)),
            args: &[],
            span: Span::new(2, 8, 3),
        });
        let specs = [
            Spec::Import(ImportSpec {
                name: None,
                path: "\"fmt\"",
                span: Span::new(2, 8, 5),
            }),
            Spec::Type(TypeSpec {
                name: Ident::new("Count", Span::new(3, 6, 5)),
                type_params: &[],
                alias: false,
                ty: int,
                span: Span::new(3, 6, 9),
            }),
        ];
        let decls = [Decl::Gen(GenDecl {
            keyword: DeclKeyword::Type,
            grouped: true,
            specs: &specs,
            span: Span::new(2, 1, 20),
        })];
        let file = SourceFile {
            package: Ident::new("main", Span::new(1, 9, 4)),
            decls: &decls,
            span: Span::new(1, 1, 40),
        };

        assert_eq!(file.imports().count(), 1);
        let names: Vec<_> = file.type_specs().map(|spec| spec.name.name).collect();
        assert_eq!(names, vec!["Count"]);
        assert_eq!(file.funcs().count(), 0);
        assert_eq!(file.decls[0].span(), Span::new(2, 1, 20));
    }
}

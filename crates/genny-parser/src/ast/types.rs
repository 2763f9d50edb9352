//! Type expression AST nodes for Go.
//!
//! Covers every type literal form in the Go grammar: named (optionally
//! package-qualified and instantiated), pointer, slice, array, map, channel,
//! function, struct and interface types.

use crate::lexer::Span;

/// An identifier with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    #[inline]
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }

    /// Whether the name starts with an upper-case letter.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// A type expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeExpr<'ast> {
    /// `T`, `pkg.T`, `List[int]`
    Named(NamedType<'ast>),
    /// `*T`
    Pointer {
        elem: &'ast TypeExpr<'ast>,
        span: Span,
    },
    /// `[]T`
    Slice {
        elem: &'ast TypeExpr<'ast>,
        span: Span,
    },
    /// `[N]T` or `[...]T`; the length expression is kept as source text.
    Array {
        len: &'ast str,
        elem: &'ast TypeExpr<'ast>,
        span: Span,
    },
    /// `map[K]V`
    Map {
        key: &'ast TypeExpr<'ast>,
        value: &'ast TypeExpr<'ast>,
        span: Span,
    },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan {
        dir: ChanDir,
        elem: &'ast TypeExpr<'ast>,
        span: Span,
    },
    /// `func(int) string`
    Func(&'ast Signature<'ast>),
    /// `struct { ... }`
    Struct {
        fields: &'ast [Field<'ast>],
        span: Span,
    },
    /// `interface { ... }`
    Interface {
        elems: &'ast [InterfaceElem<'ast>],
        span: Span,
    },
    /// `(T)`
    Paren {
        inner: &'ast TypeExpr<'ast>,
        span: Span,
    },
}

impl<'ast> TypeExpr<'ast> {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Named(named) => named.span,
            TypeExpr::Func(signature) => signature.span,
            TypeExpr::Pointer { span, .. }
            | TypeExpr::Slice { span, .. }
            | TypeExpr::Array { span, .. }
            | TypeExpr::Map { span, .. }
            | TypeExpr::Chan { span, .. }
            | TypeExpr::Struct { span, .. }
            | TypeExpr::Interface { span, .. }
            | TypeExpr::Paren { span, .. } => *span,
        }
    }

    /// The `(package, member)` pair when this is a package-qualified name,
    /// such as `generic.Type`.
    pub fn qualified_name(&self) -> Option<(&'ast str, &'ast str)> {
        match self {
            TypeExpr::Named(NamedType {
                package: Some(package),
                name,
                ..
            }) => Some((package.name, name.name)),
            _ => None,
        }
    }
}

/// A possibly qualified, possibly instantiated type name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedType<'ast> {
    /// Package qualifier, e.g. `generic` in `generic.Type`.
    pub package: Option<Ident<'ast>>,
    pub name: Ident<'ast>,
    /// Type arguments, e.g. `int` in `List[int]`.
    pub args: &'ast [TypeExpr<'ast>],
    pub span: Span,
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A function signature, shared by declarations and function types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signature<'ast> {
    pub type_params: &'ast [TypeParam<'ast>],
    pub params: &'ast [Param<'ast>],
    pub results: &'ast [Param<'ast>],
    pub span: Span,
}

/// A parameter or result entry.
///
/// Go allows `(a, b int)`, in which case both `a` and `b` become entries
/// with the same type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param<'ast> {
    pub name: Option<Ident<'ast>>,
    pub ty: TypeExpr<'ast>,
    /// `...T`
    pub variadic: bool,
}

/// A type parameter group: `K, V comparable`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeParam<'ast> {
    pub names: &'ast [Ident<'ast>],
    pub constraint: &'ast [ConstraintTerm<'ast>],
}

/// One term of a union constraint: `~int` in `~int | ~string`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintTerm<'ast> {
    pub tilde: bool,
    pub ty: TypeExpr<'ast>,
}

/// A struct field declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field<'ast> {
    /// Empty for embedded fields.
    pub names: &'ast [Ident<'ast>],
    pub ty: TypeExpr<'ast>,
    pub tag: Option<&'ast str>,
}

impl Field<'_> {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// An interface element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterfaceElem<'ast> {
    Method {
        name: Ident<'ast>,
        signature: Signature<'ast>,
    },
    /// An embedded interface or a type-set union.
    Union(&'ast [ConstraintTerm<'ast>]),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named<'a>(package: Option<&'a str>, name: &'a str) -> TypeExpr<'a> {
        TypeExpr::Named(NamedType {
            package: package.map(|p| Ident::new(p, Span::new(1, 1, p.len() as u32))),
            name: Ident::new(name, Span::new(1, 9, name.len() as u32)),
            args: &[],
            span: Span::new(1, 1, 12),
        })
    }

    #[test]
    fn qualified_name() {
        assert_eq!(
            named(Some("generic"), "Type").qualified_name(),
            Some(("generic", "Type"))
        );
        assert_eq!(named(None, "int").qualified_name(), None);
    }

    #[test]
    fn exported_identifiers() {
        assert!(Ident::new("KeyType", Span::default()).is_exported());
        assert!(!Ident::new("keyType", Span::default()).is_exported());
        assert!(!Ident::new("_x", Span::default()).is_exported());
    }

    #[test]
    fn span_of_named_type() {
        assert_eq!(named(None, "int").span(), Span::new(1, 1, 12));
    }
}

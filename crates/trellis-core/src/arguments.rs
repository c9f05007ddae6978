//! Argument-to-parameter resolution
//!
//! Given an argument at a call site, find the declared parameter it binds to.
//! Symbol information comes from a [`SemanticModel`] supplied by the caller;
//! this module only applies the binding rules:
//!
//! - `name: value` binds by exact parameter name and ignores position.
//! - Otherwise the zero-based position indexes the parameter list. Past the
//!   end, a trailing `params` parameter absorbs the argument when allowed.
//! - Without a definite signature the first candidate may stand in.
//! - Attribute arguments of the form `Name = value` set properties and never
//!   bind to a parameter.
//!
//! Failing to bind is a normal outcome and yields `None`.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::config::TrellisConfiguration;
use crate::cst::SyntaxNode;
use crate::cst::ast::{Argument, AstNode};

/// A type as reported by the semantic model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeSymbol {
    Named { name: String },
    Array { element: Box<TypeSymbol> },
    /// A type the binder could not resolve
    Error,
}

impl TypeSymbol {
    pub fn named(name: impl Into<String>) -> Self {
        TypeSymbol::Named { name: name.into() }
    }

    pub fn array(element: TypeSymbol) -> Self {
        TypeSymbol::Array {
            element: Box::new(element),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TypeSymbol::Error)
    }

    pub fn element_type(&self) -> Option<&TypeSymbol> {
        match self {
            TypeSymbol::Array { element } => Some(element),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: TypeSymbol,
    /// Declared with `params`
    pub is_params: bool,
    pub ordinal: usize,
}

impl ParameterSymbol {
    pub fn new(name: impl Into<String>, ty: TypeSymbol, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            ty,
            is_params: false,
            ordinal,
        }
    }

    pub fn params(name: impl Into<String>, ty: TypeSymbol, ordinal: usize) -> Self {
        Self {
            is_params: true,
            ..Self::new(name, ty, ordinal)
        }
    }

    /// Type an argument bound to this parameter has: the element type for a
    /// `params` array, `None` for a `params` parameter that is not an array.
    pub fn argument_type(&self) -> Option<&TypeSymbol> {
        if self.is_params {
            self.ty.element_type()
        } else {
            Some(&self.ty)
        }
    }
}

/// A method, constructor, indexer or attribute constructor signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<ParameterSymbol>,
}

impl Signature {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterSymbol>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// Binding result for a call-like node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    /// The signature the call definitely binds to
    pub symbol: Option<Signature>,
    /// Overload candidates when binding was ambiguous or failed
    pub candidates: Vec<Signature>,
}

impl SymbolInfo {
    pub fn resolved(symbol: Signature) -> Self {
        Self {
            symbol: Some(symbol),
            candidates: Vec::new(),
        }
    }

    pub fn ambiguous(candidates: Vec<Signature>) -> Self {
        Self {
            symbol: None,
            candidates,
        }
    }
}

/// Symbol lookup supplied by the host.
///
/// `call` is the node owning the argument list: an invocation, object
/// creation, element access or attribute.
pub trait SemanticModel {
    fn symbol_info(&self, call: &SyntaxNode) -> SymbolInfo;
}

/// How permissive resolution is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Bind arguments past the end of the list to a trailing `params`
    pub allow_params: bool,
    /// Use the first candidate when there is no definite signature
    pub allow_candidate: bool,
}

impl From<&TrellisConfiguration> for ResolveOptions {
    fn from(config: &TrellisConfiguration) -> Self {
        Self {
            allow_params: config.allow_params(),
            allow_candidate: config.allow_candidate(),
        }
    }
}

/// How an argument refers to its parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentRef {
    Position(usize),
    Name(String),
}

/// Bind an argument to a parameter of `signature`.
pub fn resolve_parameter<'s>(
    signature: &'s Signature,
    argument: &ArgumentRef,
    allow_params: bool,
) -> Option<&'s ParameterSymbol> {
    let parameters = &signature.parameters;
    match argument {
        ArgumentRef::Name(name) => parameters.iter().find(|p| &p.name == name),
        ArgumentRef::Position(index) => match parameters.get(*index) {
            Some(parameter) => Some(parameter),
            None => parameters.last().filter(|p| allow_params && p.is_params),
        },
    }
}

/// Resolves arguments against a semantic model.
pub struct ArgumentResolver<'m, M: SemanticModel + ?Sized> {
    model: &'m M,
    options: ResolveOptions,
}

impl<'m, M: SemanticModel + ?Sized> ArgumentResolver<'m, M> {
    pub fn new(model: &'m M, options: ResolveOptions) -> Self {
        Self { model, options }
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// The parameter `argument` binds to, if any.
    pub fn determine_parameter(&self, argument: &SyntaxNode) -> Option<ParameterSymbol> {
        let (key, info) = self.lookup(argument)?;
        let signature = match &info.symbol {
            Some(symbol) => symbol,
            None if self.options.allow_candidate => info.candidates.first()?,
            None => return None,
        };
        let parameter = resolve_parameter(signature, &key, self.options.allow_params)?;
        tracing::trace!(
            parameter = %parameter.name,
            signature = %signature.name,
            "resolved argument"
        );
        Some(parameter.clone())
    }

    /// Possible types of the parameter `argument` binds to.
    ///
    /// A definite signature yields at most one type. Otherwise the types from
    /// every candidate that binds the argument are collected in candidate
    /// order, without duplicates. Error types are skipped.
    pub fn determine_parameter_types(&self, argument: &SyntaxNode) -> IndexSet<TypeSymbol> {
        let Some((key, info)) = self.lookup(argument) else {
            return IndexSet::new();
        };
        let signatures: Vec<&Signature> = match &info.symbol {
            Some(symbol) => vec![symbol],
            None => info.candidates.iter().collect(),
        };
        signatures
            .into_iter()
            .filter_map(|s| resolve_parameter(s, &key, self.options.allow_params))
            .filter_map(ParameterSymbol::argument_type)
            .filter(|ty| !ty.is_error())
            .cloned()
            .collect()
    }

    fn lookup(&self, argument: &SyntaxNode) -> Option<(ArgumentRef, SymbolInfo)> {
        let argument = Argument::cast(argument.clone())?;
        if argument.name_equals().is_some() {
            return None;
        }
        let owner = argument.argument_list()?.owner()?;
        let info = self.model.symbol_info(&owner);
        let key = match argument.name_colon() {
            Some(name) => ArgumentRef::Name(name),
            None => ArgumentRef::Position(argument.position()?),
        };
        Some((key, info))
    }
}

/// Parameter for `argument`. See [`ArgumentResolver::determine_parameter`].
pub fn determine_parameter<M: SemanticModel + ?Sized>(
    argument: &SyntaxNode,
    model: &M,
    options: ResolveOptions,
) -> Option<ParameterSymbol> {
    ArgumentResolver::new(model, options).determine_parameter(argument)
}

/// Parameter types for `argument`. See
/// [`ArgumentResolver::determine_parameter_types`].
pub fn determine_parameter_types<M: SemanticModel + ?Sized>(
    argument: &SyntaxNode,
    model: &M,
    options: ResolveOptions,
) -> IndexSet<TypeSymbol> {
    ArgumentResolver::new(model, options).determine_parameter_types(argument)
}

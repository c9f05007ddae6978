//! Canonical ordering tables
//!
//! Two static total orders drive every insertion:
//!
//! - [`ModifierKind`]: the 17 declaration modifiers, `new` first and
//!   `partial` last.
//! - [`MemberKind`]: the 18 member categories, constant fields first and
//!   incomplete members last. Constant and non-constant fields share a syntax
//!   kind and are told apart by the `const` modifier.
//!
//! Both enums are closed and ranked with exhaustive matches. Elements that do
//! not classify into either table get the sentinel rank (one past the last
//! real rank) and therefore sort last.

use std::cmp::Ordering;
use std::fmt;

use rowan::{GreenNode, GreenNodeData, NodeOrToken};

use crate::config::{MemberSortMode, TrellisConfiguration};
use crate::cst::SyntaxKind;
use crate::cst::trivia::kind_of_raw;

/// A total order over one family of sequence elements.
pub trait CanonicalOrder {
    type Kind: Copy + Eq + fmt::Debug;

    /// Rank given to elements that do not classify.
    const SENTINEL: usize;

    fn rank(kind: Self::Kind) -> usize;

    /// Inverse of [`CanonicalOrder::rank`].
    fn kind_at(rank: usize) -> Option<Self::Kind>;

    fn classify(element: &GreenNodeData) -> Option<Self::Kind>;

    fn rank_of(element: &GreenNodeData) -> usize {
        match Self::classify(element) {
            Some(kind) => Self::rank(kind),
            None => {
                tracing::warn!(
                    kind = ?kind_of_raw(element.kind()),
                    "element has no canonical rank, ordering it last"
                );
                Self::SENTINEL
            }
        }
    }

    /// Kind match including any sub-order predicate.
    fn is_match(element: &GreenNodeData, kind: Self::Kind) -> bool {
        Self::classify(element) == Some(kind)
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Declaration modifier, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierKind {
    New,
    Public,
    Private,
    Protected,
    Internal,
    Const,
    Static,
    Virtual,
    Sealed,
    Override,
    Abstract,
    ReadOnly,
    Extern,
    Unsafe,
    Volatile,
    Async,
    Partial,
}

impl ModifierKind {
    /// All modifiers by ascending rank.
    pub const ALL: [ModifierKind; 17] = [
        ModifierKind::New,
        ModifierKind::Public,
        ModifierKind::Private,
        ModifierKind::Protected,
        ModifierKind::Internal,
        ModifierKind::Const,
        ModifierKind::Static,
        ModifierKind::Virtual,
        ModifierKind::Sealed,
        ModifierKind::Override,
        ModifierKind::Abstract,
        ModifierKind::ReadOnly,
        ModifierKind::Extern,
        ModifierKind::Unsafe,
        ModifierKind::Volatile,
        ModifierKind::Async,
        ModifierKind::Partial,
    ];

    pub fn rank(self) -> usize {
        match self {
            ModifierKind::New => 0,
            ModifierKind::Public => 1,
            ModifierKind::Private => 2,
            ModifierKind::Protected => 3,
            ModifierKind::Internal => 4,
            ModifierKind::Const => 5,
            ModifierKind::Static => 6,
            ModifierKind::Virtual => 7,
            ModifierKind::Sealed => 8,
            ModifierKind::Override => 9,
            ModifierKind::Abstract => 10,
            ModifierKind::ReadOnly => 11,
            ModifierKind::Extern => 12,
            ModifierKind::Unsafe => 13,
            ModifierKind::Volatile => 14,
            ModifierKind::Async => 15,
            ModifierKind::Partial => 16,
        }
    }

    pub fn at_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            ModifierKind::New => SyntaxKind::NewKw,
            ModifierKind::Public => SyntaxKind::PublicKw,
            ModifierKind::Private => SyntaxKind::PrivateKw,
            ModifierKind::Protected => SyntaxKind::ProtectedKw,
            ModifierKind::Internal => SyntaxKind::InternalKw,
            ModifierKind::Const => SyntaxKind::ConstKw,
            ModifierKind::Static => SyntaxKind::StaticKw,
            ModifierKind::Virtual => SyntaxKind::VirtualKw,
            ModifierKind::Sealed => SyntaxKind::SealedKw,
            ModifierKind::Override => SyntaxKind::OverrideKw,
            ModifierKind::Abstract => SyntaxKind::AbstractKw,
            ModifierKind::ReadOnly => SyntaxKind::ReadonlyKw,
            ModifierKind::Extern => SyntaxKind::ExternKw,
            ModifierKind::Unsafe => SyntaxKind::UnsafeKw,
            ModifierKind::Volatile => SyntaxKind::VolatileKw,
            ModifierKind::Async => SyntaxKind::AsyncKw,
            ModifierKind::Partial => SyntaxKind::PartialKw,
        }
    }

    pub fn from_syntax(kind: SyntaxKind) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.syntax_kind() == kind)
    }

    /// Modifier carried by a `Modifier` node.
    pub fn of(modifier: &GreenNodeData) -> Option<Self> {
        if kind_of_raw(modifier.kind()) != SyntaxKind::Modifier {
            return None;
        }
        first_significant_kind(modifier).and_then(Self::from_syntax)
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.syntax_kind().text().unwrap_or_default())
    }
}

/// Rank of a raw modifier keyword; keywords outside the table get the
/// sentinel rank.
pub fn modifier_rank(kind: SyntaxKind) -> usize {
    match ModifierKind::from_syntax(kind) {
        Some(modifier) => modifier.rank(),
        None => {
            tracing::warn!(?kind, "not a modifier keyword, ordering it last");
            ModifierOrder::SENTINEL
        }
    }
}

/// Canonical order of `Modifier` nodes in a modifier list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifierOrder;

impl CanonicalOrder for ModifierOrder {
    type Kind = ModifierKind;

    const SENTINEL: usize = ModifierKind::ALL.len();

    fn rank(kind: ModifierKind) -> usize {
        kind.rank()
    }

    fn kind_at(rank: usize) -> Option<ModifierKind> {
        ModifierKind::at_rank(rank)
    }

    fn classify(element: &GreenNodeData) -> Option<ModifierKind> {
        ModifierKind::of(element)
    }
}

/// Declared accessibility, possibly spelled with two modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    Private,
    Protected,
    Internal,
    ProtectedInternal,
    PrivateProtected,
}

impl Accessibility {
    pub fn modifiers(self) -> &'static [ModifierKind] {
        match self {
            Accessibility::Public => &[ModifierKind::Public],
            Accessibility::Private => &[ModifierKind::Private],
            Accessibility::Protected => &[ModifierKind::Protected],
            Accessibility::Internal => &[ModifierKind::Internal],
            Accessibility::ProtectedInternal => &[ModifierKind::Protected, ModifierKind::Internal],
            Accessibility::PrivateProtected => &[ModifierKind::Private, ModifierKind::Protected],
        }
    }
}

// ============================================================================
// Members
// ============================================================================

/// Member category, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    ConstField,
    Field,
    Constructor,
    Destructor,
    Delegate,
    Event,
    EventField,
    Property,
    Indexer,
    Method,
    ConversionOperator,
    Operator,
    Enum,
    Interface,
    Struct,
    Class,
    Namespace,
    Incomplete,
}

impl MemberKind {
    /// All member kinds by ascending rank.
    pub const ALL: [MemberKind; 18] = [
        MemberKind::ConstField,
        MemberKind::Field,
        MemberKind::Constructor,
        MemberKind::Destructor,
        MemberKind::Delegate,
        MemberKind::Event,
        MemberKind::EventField,
        MemberKind::Property,
        MemberKind::Indexer,
        MemberKind::Method,
        MemberKind::ConversionOperator,
        MemberKind::Operator,
        MemberKind::Enum,
        MemberKind::Interface,
        MemberKind::Struct,
        MemberKind::Class,
        MemberKind::Namespace,
        MemberKind::Incomplete,
    ];

    pub fn rank(self) -> usize {
        match self {
            MemberKind::ConstField => 0,
            MemberKind::Field => 1,
            MemberKind::Constructor => 2,
            MemberKind::Destructor => 3,
            MemberKind::Delegate => 4,
            MemberKind::Event => 5,
            MemberKind::EventField => 6,
            MemberKind::Property => 7,
            MemberKind::Indexer => 8,
            MemberKind::Method => 9,
            MemberKind::ConversionOperator => 10,
            MemberKind::Operator => 11,
            MemberKind::Enum => 12,
            MemberKind::Interface => 13,
            MemberKind::Struct => 14,
            MemberKind::Class => 15,
            MemberKind::Namespace => 16,
            MemberKind::Incomplete => 17,
        }
    }

    pub fn at_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            MemberKind::ConstField | MemberKind::Field => SyntaxKind::FieldDecl,
            MemberKind::Constructor => SyntaxKind::ConstructorDecl,
            MemberKind::Destructor => SyntaxKind::DestructorDecl,
            MemberKind::Delegate => SyntaxKind::DelegateDecl,
            MemberKind::Event => SyntaxKind::EventDecl,
            MemberKind::EventField => SyntaxKind::EventFieldDecl,
            MemberKind::Property => SyntaxKind::PropertyDecl,
            MemberKind::Indexer => SyntaxKind::IndexerDecl,
            MemberKind::Method => SyntaxKind::MethodDecl,
            MemberKind::ConversionOperator => SyntaxKind::ConversionOperatorDecl,
            MemberKind::Operator => SyntaxKind::OperatorDecl,
            MemberKind::Enum => SyntaxKind::EnumDecl,
            MemberKind::Interface => SyntaxKind::InterfaceDecl,
            MemberKind::Struct => SyntaxKind::StructDecl,
            MemberKind::Class => SyntaxKind::ClassDecl,
            MemberKind::Namespace => SyntaxKind::NamespaceDecl,
            MemberKind::Incomplete => SyntaxKind::IncompleteMember,
        }
    }

    /// Category of a syntax kind; `is_const` only matters for fields.
    pub fn from_syntax(kind: SyntaxKind, is_const: bool) -> Option<Self> {
        let member = match kind {
            SyntaxKind::FieldDecl if is_const => MemberKind::ConstField,
            SyntaxKind::FieldDecl => MemberKind::Field,
            SyntaxKind::ConstructorDecl => MemberKind::Constructor,
            SyntaxKind::DestructorDecl => MemberKind::Destructor,
            SyntaxKind::DelegateDecl => MemberKind::Delegate,
            SyntaxKind::EventDecl => MemberKind::Event,
            SyntaxKind::EventFieldDecl => MemberKind::EventField,
            SyntaxKind::PropertyDecl => MemberKind::Property,
            SyntaxKind::IndexerDecl => MemberKind::Indexer,
            SyntaxKind::MethodDecl => MemberKind::Method,
            SyntaxKind::ConversionOperatorDecl => MemberKind::ConversionOperator,
            SyntaxKind::OperatorDecl => MemberKind::Operator,
            SyntaxKind::EnumDecl => MemberKind::Enum,
            SyntaxKind::InterfaceDecl => MemberKind::Interface,
            SyntaxKind::StructDecl => MemberKind::Struct,
            SyntaxKind::ClassDecl => MemberKind::Class,
            SyntaxKind::NamespaceDecl => MemberKind::Namespace,
            SyntaxKind::IncompleteMember => MemberKind::Incomplete,
            _ => return None,
        };
        Some(member)
    }

    pub fn of(member: &GreenNodeData) -> Option<Self> {
        let kind = kind_of_raw(member.kind());
        let is_const = kind == SyntaxKind::FieldDecl && has_modifier(member, ModifierKind::Const);
        Self::from_syntax(kind, is_const)
    }
}

/// Canonical order of members in a compilation unit, namespace or type.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberOrder;

impl CanonicalOrder for MemberOrder {
    type Kind = MemberKind;

    const SENTINEL: usize = MemberKind::ALL.len();

    fn rank(kind: MemberKind) -> usize {
        kind.rank()
    }

    fn kind_at(rank: usize) -> Option<MemberKind> {
        MemberKind::at_rank(rank)
    }

    fn classify(element: &GreenNodeData) -> Option<MemberKind> {
        MemberKind::of(element)
    }
}

/// Compares members by rank and, depending on the sort mode, by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberComparer {
    pub sort_mode: MemberSortMode,
}

impl MemberComparer {
    pub fn new(sort_mode: MemberSortMode) -> Self {
        Self { sort_mode }
    }

    /// Comparer using `ordering.memberSortMode`.
    pub fn from_config(config: &TrellisConfiguration) -> Self {
        Self::new(config.member_sort_mode())
    }

    pub fn compare(&self, a: &GreenNodeData, b: &GreenNodeData) -> Ordering {
        let by_rank = MemberOrder::rank_of(a).cmp(&MemberOrder::rank_of(b));
        match self.sort_mode {
            MemberSortMode::ByKind => by_rank,
            MemberSortMode::ByKindThenByName => {
                by_rank.then_with(|| member_name(a).cmp(&member_name(b)))
            }
        }
    }

    pub fn is_sorted(&self, members: &[GreenNode]) -> bool {
        members
            .windows(2)
            .all(|pair| self.compare(&pair[0], &pair[1]) != Ordering::Greater)
    }
}

/// Compares `Modifier` nodes by rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierComparer;

impl ModifierComparer {
    pub fn compare(&self, a: &GreenNodeData, b: &GreenNodeData) -> Ordering {
        ModifierOrder::rank_of(a).cmp(&ModifierOrder::rank_of(b))
    }

    pub fn is_sorted(&self, modifiers: &[GreenNode]) -> bool {
        modifiers
            .windows(2)
            .all(|pair| self.compare(&pair[0], &pair[1]) != Ordering::Greater)
    }
}

/// Declared name: the first identifier directly under the member node.
pub fn member_name(member: &GreenNodeData) -> Option<String> {
    member.children().find_map(|child| match child {
        NodeOrToken::Token(t) if kind_of_raw(t.kind()) == SyntaxKind::Ident => {
            Some(t.text().to_string())
        }
        _ => None,
    })
}

/// Whether a declaration's modifier list contains `modifier`.
pub fn has_modifier(declaration: &GreenNodeData, modifier: ModifierKind) -> bool {
    declaration
        .children()
        .filter_map(NodeOrToken::into_node)
        .filter(|n| kind_of_raw(n.kind()) == SyntaxKind::ModifierList)
        .flat_map(|list| list.children().filter_map(NodeOrToken::into_node))
        .any(|m| ModifierKind::of(m) == Some(modifier))
}

fn first_significant_kind(node: &GreenNodeData) -> Option<SyntaxKind> {
    node.children().find_map(|child| match child {
        NodeOrToken::Token(t) => {
            let kind = kind_of_raw(t.kind());
            (!kind.is_trivia()).then_some(kind)
        }
        NodeOrToken::Node(n) => first_significant_kind(n),
    })
}

//! Insertion engine
//!
//! Inserts an element into a canonically ordered sequence (modifiers of a
//! declaration, members of a type) without re-sorting it:
//!
//! 1. Scan ranks downward from the new element's rank.
//! 2. For each rank, find the last element of that rank (sub-order predicate
//!    included, so constant fields and fields are told apart).
//! 3. Insert right after the first hit, or at index 0 if nothing of an equal
//!    or lower rank exists.
//!
//! The sequence family decides how trivia moves:
//!
//! - Modifiers share a line, so the element at the insertion index donates
//!   its leading trivia to the new modifier, which then starts the line in
//!   its place. A modifier without trailing trivia gets one space.
//! - Members own their lines, so no trivia changes hands. A member without
//!   leading trivia adopts its neighbor's indentation, one without trailing
//!   trivia gets its neighbor's line break.
//!
//! Elements without a rank go last; structural misuse is an error.

use rowan::{GreenNode, NodeOrToken};

use crate::config::{FormattingOptions, TrellisConfiguration};
use crate::cst::trivia::{
    self, TriviaList, has_significant_token, kind_of, kind_of_raw, leading_trivia,
    owned_children, trailing_trivia, with_leading_trivia, with_trailing_trivia,
};
use crate::cst::{GreenElement, SyntaxKind, SyntaxNode, ast, edit, make};
use crate::error::TrellisError;
use crate::ordering::{
    Accessibility, CanonicalOrder, MemberKind, MemberOrder, ModifierKind, ModifierOrder,
};
use crate::result::Result;

/// How trivia is redistributed when an element joins a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaPolicy {
    /// The displaced element hands its leading trivia to the new element.
    /// Spaces between modifiers belong to the modifier before them, so an
    /// appended modifier carries a trailing space rather than a leading one.
    Donate,
    /// Elements keep their own lines; bare elements copy a neighbor's layout.
    OwnLine,
}

/// A canonical order plus the trivia policy of its sequences.
pub trait InsertionFamily: CanonicalOrder {
    const POLICY: TriviaPolicy;
}

impl InsertionFamily for ModifierOrder {
    const POLICY: TriviaPolicy = TriviaPolicy::Donate;
}

impl InsertionFamily for MemberOrder {
    const POLICY: TriviaPolicy = TriviaPolicy::OwnLine;
}

/// Index at which an element of `rank` belongs in `elements`.
pub fn insertion_index<O: CanonicalOrder>(elements: &[GreenNode], rank: usize) -> usize {
    if elements.is_empty() {
        return 0;
    }
    if rank >= O::SENTINEL {
        return elements.len();
    }
    for candidate in (0..=rank).rev() {
        let Some(kind) = O::kind_at(candidate) else {
            continue;
        };
        if let Some(last) = elements.iter().rposition(|e| O::is_match(e, kind)) {
            return last + 1;
        }
    }
    0
}

/// Insert `element` into an ordered sequence, returning the new sequence and
/// the element's index in it.
pub fn insert<O: InsertionFamily>(elements: &[GreenNode], element: GreenNode) -> (Vec<GreenNode>, usize) {
    insert_with::<O>(elements, element, &FormattingOptions::default())
}

/// [`insert`] with the line break a bare member falls back to taken from
/// `formatting`.
pub fn insert_with<O: InsertionFamily>(
    elements: &[GreenNode],
    element: GreenNode,
    formatting: &FormattingOptions,
) -> (Vec<GreenNode>, usize) {
    let index = insertion_index::<O>(elements, O::rank_of(&element));
    let mut sequence = elements.to_vec();

    let element = match O::POLICY {
        TriviaPolicy::Donate => {
            let element = match sequence.get(index) {
                Some(donor) => {
                    let (element, donor) = donate_leading(&element, donor);
                    sequence[index] = donor;
                    element
                }
                None => element,
            };
            ensure_trailing_space(element)
        }
        TriviaPolicy::OwnLine => {
            let neighbor = sequence
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| sequence.get(i)));
            match neighbor {
                Some(neighbor) => adopt_line(element, neighbor, &formatting.newline),
                None => element,
            }
        }
    };

    sequence.insert(index, element);
    (sequence, index)
}

/// Move the donor's leading trivia in front of the element's own.
fn donate_leading(element: &GreenNode, donor: &GreenNode) -> (GreenNode, GreenNode) {
    let donated = leading_trivia(donor);
    if donated.is_empty() {
        return (element.clone(), donor.clone());
    }
    let leading = donated.concat(leading_trivia(element));
    (
        with_leading_trivia(element, leading),
        with_leading_trivia(donor, TriviaList::new()),
    )
}

fn ensure_trailing_space(element: GreenNode) -> GreenNode {
    if trailing_trivia(&element).is_empty() {
        with_trailing_trivia(&element, TriviaList::space())
    } else {
        element
    }
}

fn adopt_line(element: GreenNode, neighbor: &GreenNode, newline: &str) -> GreenNode {
    let element = if leading_trivia(&element).is_empty() {
        with_leading_trivia(&element, leading_trivia(neighbor).indentation())
    } else {
        element
    };
    if trailing_trivia(&element).is_empty() {
        with_trailing_trivia(&element, line_break_of(neighbor, newline))
    } else {
        element
    }
}

/// The line break ending `node`, or `newline`.
fn line_break_of(node: &GreenNode, newline: &str) -> TriviaList {
    match trailing_trivia(node).iter().last() {
        Some(token) if kind_of(token) == SyntaxKind::Newline => {
            TriviaList::from(vec![token.clone()])
        }
        _ => TriviaList::from(vec![trivia::newline(newline)]),
    }
}

/// Remove the trivia in front of the first significant element at or after
/// `at` and return it.
fn take_leading(children: &mut Vec<GreenElement>, at: usize) -> TriviaList {
    let mut taken = TriviaList::new();
    let mut i = at;
    while i < children.len() {
        match &children[i] {
            NodeOrToken::Token(t) if kind_of(t).is_trivia() => {
                taken.push(t.clone());
                children.remove(i);
            }
            NodeOrToken::Token(_) => break,
            NodeOrToken::Node(n) if has_significant_token(n) => {
                taken.extend(leading_trivia(n));
                let stripped = with_leading_trivia(n, TriviaList::new());
                children[i] = NodeOrToken::Node(stripped);
                break;
            }
            NodeOrToken::Node(_) => i += 1,
        }
    }
    taken
}

/// Child indices of the nodes matching `predicate`.
fn slots(children: &[GreenElement], predicate: impl Fn(SyntaxKind) -> bool) -> Vec<usize> {
    children
        .iter()
        .enumerate()
        .filter_map(|(i, c)| match c {
            NodeOrToken::Node(n) if predicate(kind_of_raw(n.kind())) => Some(i),
            _ => None,
        })
        .collect()
}

fn slot_nodes(children: &[GreenElement], slots: &[usize]) -> Vec<GreenNode> {
    slots
        .iter()
        .filter_map(|&i| children[i].as_node().cloned())
        .collect()
}

/// Write an updated sequence (one element longer than `slots`) back into
/// the children list.
fn splice_sequence(
    children: &mut Vec<GreenElement>,
    slots: &[usize],
    sequence: Vec<GreenNode>,
    index: usize,
    empty_position: usize,
) {
    let position = match (slots.get(index), slots.last()) {
        (Some(&slot), _) => slot,
        (None, Some(&last)) => last + 1,
        (None, None) => empty_position,
    };
    let mut sequence: Vec<Option<GreenNode>> = sequence.into_iter().map(Some).collect();
    for (k, &slot) in slots.iter().enumerate() {
        let from = if k >= index { k + 1 } else { k };
        if let Some(node) = sequence[from].take() {
            children[slot] = NodeOrToken::Node(node);
        }
    }
    if let Some(node) = sequence[index].take() {
        children.insert(position, NodeOrToken::Node(node));
    }
}

/// Where the first member of an empty container goes: after the line of
/// the opening brace, or at the end of a compilation unit.
fn empty_member_position(children: &[GreenElement]) -> usize {
    let open_brace = children.iter().position(|c| match c {
        NodeOrToken::Token(t) => kind_of(t) == SyntaxKind::LBrace,
        NodeOrToken::Node(_) => false,
    });
    match open_brace {
        Some(i) => edit::end_of_line(children, i),
        None => children.len(),
    }
}

fn can_have_modifiers(kind: SyntaxKind) -> bool {
    kind.is_member() && kind != SyntaxKind::NamespaceDecl
}

/// Outcome of an insertion.
#[derive(Debug, Clone)]
pub struct Insertion {
    /// The edited container or declaration, in the new tree
    pub node: SyntaxNode,
    /// The inserted element, in the new tree
    pub element: SyntaxNode,
    /// Position of the inserted element in its sequence
    pub index: usize,
}

/// Tree-level insertion operations.
#[derive(Debug, Clone, Default)]
pub struct Inserter {
    formatting: FormattingOptions,
}

impl Inserter {
    pub fn new(formatting: FormattingOptions) -> Self {
        Self { formatting }
    }

    pub fn from_config(config: &TrellisConfiguration) -> Self {
        Self::new(config.formatting_options())
    }

    /// Insert a member declaration into a compilation unit, namespace or
    /// type, at its canonical position.
    pub fn insert_member(&self, container: &SyntaxNode, member: GreenNode) -> Result<Insertion> {
        if !container.kind().is_member_container() {
            return Err(TrellisError::unsupported(container.kind(), "insert a member"));
        }
        let member_kind = kind_of_raw(member.kind());
        if !member_kind.is_member() {
            return Err(TrellisError::invalid_argument(
                "member",
                format!("{member_kind:?} is not a member declaration"),
            ));
        }

        let mut children = owned_children(&container.green());
        let slots = slots(&children, SyntaxKind::is_member);
        let members = slot_nodes(&children, &slots);

        let member = if members.is_empty() {
            self.first_member_layout(container, member)
        } else {
            member
        };
        let (sequence, index) = insert_with::<MemberOrder>(&members, member, &self.formatting);
        let empty_position = empty_member_position(&children);
        splice_sequence(&mut children, &slots, sequence, index, empty_position);

        let node = edit::replace_children(container, children)?;
        tracing::debug!(kind = ?member_kind, index, "inserted member");
        let element = node
            .children()
            .filter(|n| n.kind().is_member())
            .nth(index)
            .ok_or_else(|| TrellisError::internal("inserted member not found"))?;
        Ok(Insertion {
            node,
            element,
            index,
        })
    }

    /// Layout for a member entering an empty container: one indentation
    /// level deeper than the container's own line.
    fn first_member_layout(&self, container: &SyntaxNode, member: GreenNode) -> GreenNode {
        let member = if leading_trivia(&member).is_empty() {
            let indent = if container.kind() == SyntaxKind::CompilationUnit {
                String::new()
            } else {
                let outer = leading_trivia(&container.green()).indentation().text();
                format!("{outer}{}", self.formatting.indent_unit)
            };
            with_leading_trivia(&member, TriviaList::indent(&indent))
        } else {
            member
        };
        if trailing_trivia(&member).is_empty() {
            let newline = TriviaList::from(vec![trivia::newline(&self.formatting.newline)]);
            with_trailing_trivia(&member, newline)
        } else {
            member
        }
    }

    /// Insert a `Modifier` node into a declaration's modifier list at its
    /// canonical position, creating the list if needed.
    pub fn insert_modifier(&self, declaration: &SyntaxNode, modifier: GreenNode) -> Result<Insertion> {
        if !can_have_modifiers(declaration.kind()) {
            return Err(TrellisError::unsupported(declaration.kind(), "insert a modifier"));
        }
        let Some(modifier_kind) = ModifierKind::of(&modifier) else {
            return Err(TrellisError::invalid_argument(
                "modifier",
                format!("{:?} is not a modifier", kind_of_raw(modifier.kind())),
            ));
        };

        let mut children = owned_children(&declaration.green());
        let list_position = children.iter().position(|c| {
            c.as_node()
                .is_some_and(|n| kind_of_raw(n.kind()) == SyntaxKind::ModifierList)
        });

        let index = match list_position {
            Some(list_position) => {
                let list = children[list_position]
                    .as_node()
                    .cloned()
                    .ok_or_else(|| TrellisError::internal("modifier list vanished"))?;
                let mut list_children = owned_children(&list);
                let slots = slots(&list_children, |k| k == SyntaxKind::Modifier);
                let modifiers = slot_nodes(&list_children, &slots);

                let (mut sequence, index) =
                    insert_with::<ModifierOrder>(&modifiers, modifier, &self.formatting);
                if index == modifiers.len() {
                    // Appended: the token after the list donates instead
                    let donated = take_leading(&mut children, list_position + 1);
                    if !donated.is_empty() {
                        let own = leading_trivia(&sequence[index]);
                        sequence[index] = with_leading_trivia(&sequence[index], donated.concat(own));
                    }
                }
                let end = list_children.len();
                splice_sequence(&mut list_children, &slots, sequence, index, end);
                children[list_position] = NodeOrToken::Node(GreenNode::new(
                    SyntaxKind::ModifierList.into(),
                    list_children,
                ));
                index
            }
            None => {
                let position = children
                    .iter()
                    .rposition(|c| {
                        c.as_node()
                            .is_some_and(|n| kind_of_raw(n.kind()) == SyntaxKind::AttributeList)
                    })
                    .map_or(0, |i| i + 1);
                let donated = take_leading(&mut children, position);
                let own = leading_trivia(&modifier);
                let modifier = ensure_trailing_space(with_leading_trivia(&modifier, donated.concat(own)));
                let list = GreenNode::new(
                    SyntaxKind::ModifierList.into(),
                    vec![NodeOrToken::Node(modifier)],
                );
                children.insert(position, NodeOrToken::Node(list));
                0
            }
        };

        let node = edit::replace_children(declaration, children)?;
        tracing::debug!(modifier = %modifier_kind, index, "inserted modifier");
        let element = node
            .children()
            .find(|n| n.kind() == SyntaxKind::ModifierList)
            .and_then(|list| {
                list.children()
                    .filter(|n| n.kind() == SyntaxKind::Modifier)
                    .nth(index)
            })
            .ok_or_else(|| TrellisError::internal("inserted modifier not found"))?;
        Ok(Insertion {
            node,
            element,
            index,
        })
    }

    pub fn insert_modifier_kind(&self, declaration: &SyntaxNode, kind: ModifierKind) -> Result<Insertion> {
        self.insert_modifier(declaration, make::modifier(kind))
    }

    /// Insert the modifiers spelling `accessibility`, one after another.
    pub fn insert_accessibility(
        &self,
        declaration: &SyntaxNode,
        accessibility: Accessibility,
    ) -> Result<SyntaxNode> {
        accessibility
            .modifiers()
            .iter()
            .try_fold(declaration.clone(), |node, &kind| {
                Ok(self.insert_modifier_kind(&node, kind)?.node)
            })
    }
}

/// Insert a member with default formatting. See [`Inserter::insert_member`].
pub fn insert_member(container: &SyntaxNode, member: GreenNode) -> Result<Insertion> {
    Inserter::default().insert_member(container, member)
}

/// Insert a modifier with default formatting. See [`Inserter::insert_modifier`].
pub fn insert_modifier(declaration: &SyntaxNode, modifier: GreenNode) -> Result<Insertion> {
    Inserter::default().insert_modifier(declaration, modifier)
}

pub fn insert_modifier_kind(declaration: &SyntaxNode, kind: ModifierKind) -> Result<Insertion> {
    Inserter::default().insert_modifier_kind(declaration, kind)
}

pub fn insert_accessibility(declaration: &SyntaxNode, accessibility: Accessibility) -> Result<SyntaxNode> {
    Inserter::default().insert_accessibility(declaration, accessibility)
}

/// Index a member of `kind` would get in `container`.
pub fn member_insert_index(container: &SyntaxNode, kind: MemberKind) -> Result<usize> {
    if !container.kind().is_member_container() {
        return Err(TrellisError::unsupported(container.kind(), "hold members"));
    }
    let members: Vec<GreenNode> = container
        .children()
        .filter(|n| n.kind().is_member())
        .map(|n| n.green().into_owned())
        .collect();
    Ok(insertion_index::<MemberOrder>(&members, kind.rank()))
}

pub fn field_insert_index(container: &SyntaxNode, is_const: bool) -> Result<usize> {
    let kind = if is_const {
        MemberKind::ConstField
    } else {
        MemberKind::Field
    };
    member_insert_index(container, kind)
}

/// Index a modifier of `kind` would get in the declaration's modifier list.
pub fn modifier_insert_index(declaration: &SyntaxNode, kind: ModifierKind) -> Result<usize> {
    if !can_have_modifiers(declaration.kind()) {
        return Err(TrellisError::unsupported(declaration.kind(), "carry modifiers"));
    }
    let modifiers: Vec<GreenNode> = ast::modifier_list(declaration)
        .map(|list| {
            list.modifiers()
                .map(|m| ast::AstNode::syntax(&m).green().into_owned())
                .collect()
        })
        .unwrap_or_default();
    Ok(insertion_index::<ModifierOrder>(&modifiers, kind.rank()))
}

//! Syntax kinds for the declaration tree
//!
//! Every token and node in the tree carries one of these kinds. The numeric
//! values are grouped by category and are stable: they are what rowan stores
//! in green nodes, so `TrellisLanguage::kind_from_raw` must stay in sync.

/// All token and node kinds of the declaration tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Trivia (0-9)
    Whitespace = 0,
    Newline = 1,
    LineComment = 2,
    BlockComment = 3,
    /// `///` single-line documentation comment
    DocComment = 4,
    /// Preprocessor directive line (`#if`, `#region`, ...)
    Directive = 5,

    // Modifier keywords (10-29)
    NewKw = 10,
    PublicKw = 11,
    PrivateKw = 12,
    ProtectedKw = 13,
    InternalKw = 14,
    ConstKw = 15,
    StaticKw = 16,
    VirtualKw = 17,
    SealedKw = 18,
    OverrideKw = 19,
    AbstractKw = 20,
    ReadonlyKw = 21,
    ExternKw = 22,
    UnsafeKw = 23,
    VolatileKw = 24,
    AsyncKw = 25,
    PartialKw = 26,

    // Other keywords (30-59)
    ClassKw = 30,
    StructKw = 31,
    InterfaceKw = 32,
    EnumKw = 33,
    NamespaceKw = 34,
    DelegateKw = 35,
    EventKw = 36,
    OperatorKw = 37,
    ImplicitKw = 38,
    ExplicitKw = 39,
    ThisKw = 40,
    ParamsKw = 41,
    IfKw = 42,
    ElseKw = 43,
    SwitchKw = 44,
    CaseKw = 45,
    DefaultKw = 46,
    ReturnKw = 47,
    BreakKw = 48,
    WhileKw = 49,
    ForeachKw = 50,
    InKw = 51,

    // Punctuation (60-79)
    LBrace = 60,
    RBrace = 61,
    LParen = 62,
    RParen = 63,
    LBracket = 64,
    RBracket = 65,
    Semicolon = 66,
    Colon = 67,
    Comma = 68,
    Equals = 69,
    Tilde = 70,
    Dot = 71,

    // Identifiers and opaque text (80-99)
    Ident = 80,
    Literal = 81,
    /// Expression text the tree does not structure further
    RawText = 82,

    // Declarations (100-119)
    CompilationUnit = 100,
    NamespaceDecl = 101,
    ClassDecl = 102,
    StructDecl = 103,
    InterfaceDecl = 104,
    EnumDecl = 105,
    DelegateDecl = 106,
    FieldDecl = 107,
    EventFieldDecl = 108,
    EventDecl = 109,
    PropertyDecl = 110,
    IndexerDecl = 111,
    ConstructorDecl = 112,
    DestructorDecl = 113,
    MethodDecl = 114,
    OperatorDecl = 115,
    ConversionOperatorDecl = 116,
    IncompleteMember = 117,

    // Declaration parts (120-139)
    AttributeList = 120,
    Attribute = 121,
    ModifierList = 122,
    Modifier = 123,
    TypeRef = 124,
    ParameterList = 125,
    Parameter = 126,
    AccessorList = 127,

    // Statements (140-159)
    Block = 140,
    ExprStmt = 141,
    LocalDeclStmt = 142,
    LabeledStmt = 143,
    ReturnStmt = 144,
    BreakStmt = 145,
    EmptyStmt = 146,
    IfStmt = 147,
    ElseClause = 148,
    SwitchStmt = 149,
    SwitchSection = 150,
    SwitchLabel = 151,
    WhileStmt = 152,
    ForEachStmt = 153,

    // Expressions and argument lists (160-179)
    Expr = 160,
    InvocationExpr = 161,
    ObjectCreationExpr = 162,
    ElementAccessExpr = 163,
    ArgumentList = 164,
    BracketedArgumentList = 165,
    AttributeArgumentList = 166,
    Argument = 167,
    AttributeArgument = 168,
    NameColon = 169,
    NameEquals = 170,

    // Special (400+)
    Error = 400,
    Unknown = 401,
}

impl SyntaxKind {
    /// Whitespace, line breaks, comments and directive lines.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace
                | SyntaxKind::Newline
                | SyntaxKind::LineComment
                | SyntaxKind::BlockComment
                | SyntaxKind::DocComment
                | SyntaxKind::Directive
        )
    }

    /// Trivia that carries no content: spaces, tabs and line breaks.
    pub fn is_whitespace(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Newline)
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::DocComment
        )
    }

    pub fn is_modifier_keyword(self) -> bool {
        (SyntaxKind::NewKw as u16..=SyntaxKind::PartialKw as u16).contains(&(self as u16))
    }

    /// Declarations that can appear as members of a compilation unit,
    /// namespace or type.
    pub fn is_member(self) -> bool {
        (SyntaxKind::NamespaceDecl as u16..=SyntaxKind::IncompleteMember as u16)
            .contains(&(self as u16))
    }

    /// Nodes whose members form an ordered member sequence.
    pub fn is_member_container(self) -> bool {
        matches!(
            self,
            SyntaxKind::CompilationUnit
                | SyntaxKind::NamespaceDecl
                | SyntaxKind::ClassDecl
                | SyntaxKind::StructDecl
                | SyntaxKind::InterfaceDecl
        )
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::ExprStmt
                | SyntaxKind::LocalDeclStmt
                | SyntaxKind::LabeledStmt
                | SyntaxKind::ReturnStmt
                | SyntaxKind::BreakStmt
                | SyntaxKind::EmptyStmt
                | SyntaxKind::IfStmt
                | SyntaxKind::SwitchStmt
                | SyntaxKind::WhileStmt
                | SyntaxKind::ForEachStmt
        )
    }

    /// Nodes that hold a call-site argument list.
    pub fn is_argument_list(self) -> bool {
        matches!(
            self,
            SyntaxKind::ArgumentList
                | SyntaxKind::BracketedArgumentList
                | SyntaxKind::AttributeArgumentList
        )
    }

    /// Source text of fixed-text tokens, `None` for tokens with free text.
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::NewKw => "new",
            SyntaxKind::PublicKw => "public",
            SyntaxKind::PrivateKw => "private",
            SyntaxKind::ProtectedKw => "protected",
            SyntaxKind::InternalKw => "internal",
            SyntaxKind::ConstKw => "const",
            SyntaxKind::StaticKw => "static",
            SyntaxKind::VirtualKw => "virtual",
            SyntaxKind::SealedKw => "sealed",
            SyntaxKind::OverrideKw => "override",
            SyntaxKind::AbstractKw => "abstract",
            SyntaxKind::ReadonlyKw => "readonly",
            SyntaxKind::ExternKw => "extern",
            SyntaxKind::UnsafeKw => "unsafe",
            SyntaxKind::VolatileKw => "volatile",
            SyntaxKind::AsyncKw => "async",
            SyntaxKind::PartialKw => "partial",
            SyntaxKind::ClassKw => "class",
            SyntaxKind::StructKw => "struct",
            SyntaxKind::InterfaceKw => "interface",
            SyntaxKind::EnumKw => "enum",
            SyntaxKind::NamespaceKw => "namespace",
            SyntaxKind::DelegateKw => "delegate",
            SyntaxKind::EventKw => "event",
            SyntaxKind::OperatorKw => "operator",
            SyntaxKind::ImplicitKw => "implicit",
            SyntaxKind::ExplicitKw => "explicit",
            SyntaxKind::ThisKw => "this",
            SyntaxKind::ParamsKw => "params",
            SyntaxKind::IfKw => "if",
            SyntaxKind::ElseKw => "else",
            SyntaxKind::SwitchKw => "switch",
            SyntaxKind::CaseKw => "case",
            SyntaxKind::DefaultKw => "default",
            SyntaxKind::ReturnKw => "return",
            SyntaxKind::BreakKw => "break",
            SyntaxKind::WhileKw => "while",
            SyntaxKind::ForeachKw => "foreach",
            SyntaxKind::InKw => "in",
            SyntaxKind::LBrace => "{",
            SyntaxKind::RBrace => "}",
            SyntaxKind::LParen => "(",
            SyntaxKind::RParen => ")",
            SyntaxKind::LBracket => "[",
            SyntaxKind::RBracket => "]",
            SyntaxKind::Semicolon => ";",
            SyntaxKind::Colon => ":",
            SyntaxKind::Comma => ",",
            SyntaxKind::Equals => "=",
            SyntaxKind::Tilde => "~",
            SyntaxKind::Dot => ".",
            _ => return None,
        };
        Some(text)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia_classification() {
        assert!(SyntaxKind::Whitespace.is_trivia());
        assert!(SyntaxKind::Directive.is_trivia());
        assert!(!SyntaxKind::Directive.is_whitespace());
        assert!(SyntaxKind::DocComment.is_comment());
        assert!(!SyntaxKind::Ident.is_trivia());
    }

    #[test]
    fn test_modifier_keyword_range() {
        assert!(SyntaxKind::NewKw.is_modifier_keyword());
        assert!(SyntaxKind::PartialKw.is_modifier_keyword());
        assert!(!SyntaxKind::ClassKw.is_modifier_keyword());
    }

    #[test]
    fn test_member_range() {
        assert!(SyntaxKind::FieldDecl.is_member());
        assert!(SyntaxKind::IncompleteMember.is_member());
        assert!(SyntaxKind::NamespaceDecl.is_member());
        assert!(!SyntaxKind::CompilationUnit.is_member());
        assert!(!SyntaxKind::ModifierList.is_member());
    }
}

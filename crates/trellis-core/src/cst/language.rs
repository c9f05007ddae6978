//! Rowan language implementation for the declaration tree
//!
//! This module implements the `rowan::Language` trait, which connects our
//! `SyntaxKind` enum to Rowan's generic CST infrastructure.

use rowan::Language;

use super::SyntaxKind;

/// Language marker for declaration trees
///
/// Zero-sized type that implements `rowan::Language` to tie our syntax kinds
/// to Rowan's generic tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrellisLanguage;

impl Language for TrellisLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        match raw.0 {
            // Trivia
            0 => SyntaxKind::Whitespace,
            1 => SyntaxKind::Newline,
            2 => SyntaxKind::LineComment,
            3 => SyntaxKind::BlockComment,
            4 => SyntaxKind::DocComment,
            5 => SyntaxKind::Directive,

            // Modifier keywords (10-29)
            10 => SyntaxKind::NewKw,
            11 => SyntaxKind::PublicKw,
            12 => SyntaxKind::PrivateKw,
            13 => SyntaxKind::ProtectedKw,
            14 => SyntaxKind::InternalKw,
            15 => SyntaxKind::ConstKw,
            16 => SyntaxKind::StaticKw,
            17 => SyntaxKind::VirtualKw,
            18 => SyntaxKind::SealedKw,
            19 => SyntaxKind::OverrideKw,
            20 => SyntaxKind::AbstractKw,
            21 => SyntaxKind::ReadonlyKw,
            22 => SyntaxKind::ExternKw,
            23 => SyntaxKind::UnsafeKw,
            24 => SyntaxKind::VolatileKw,
            25 => SyntaxKind::AsyncKw,
            26 => SyntaxKind::PartialKw,

            // Other keywords (30-59)
            30 => SyntaxKind::ClassKw,
            31 => SyntaxKind::StructKw,
            32 => SyntaxKind::InterfaceKw,
            33 => SyntaxKind::EnumKw,
            34 => SyntaxKind::NamespaceKw,
            35 => SyntaxKind::DelegateKw,
            36 => SyntaxKind::EventKw,
            37 => SyntaxKind::OperatorKw,
            38 => SyntaxKind::ImplicitKw,
            39 => SyntaxKind::ExplicitKw,
            40 => SyntaxKind::ThisKw,
            41 => SyntaxKind::ParamsKw,
            42 => SyntaxKind::IfKw,
            43 => SyntaxKind::ElseKw,
            44 => SyntaxKind::SwitchKw,
            45 => SyntaxKind::CaseKw,
            46 => SyntaxKind::DefaultKw,
            47 => SyntaxKind::ReturnKw,
            48 => SyntaxKind::BreakKw,
            49 => SyntaxKind::WhileKw,
            50 => SyntaxKind::ForeachKw,
            51 => SyntaxKind::InKw,

            // Punctuation (60-79)
            60 => SyntaxKind::LBrace,
            61 => SyntaxKind::RBrace,
            62 => SyntaxKind::LParen,
            63 => SyntaxKind::RParen,
            64 => SyntaxKind::LBracket,
            65 => SyntaxKind::RBracket,
            66 => SyntaxKind::Semicolon,
            67 => SyntaxKind::Colon,
            68 => SyntaxKind::Comma,
            69 => SyntaxKind::Equals,
            70 => SyntaxKind::Tilde,
            71 => SyntaxKind::Dot,

            // Identifiers and opaque text (80-99)
            80 => SyntaxKind::Ident,
            81 => SyntaxKind::Literal,
            82 => SyntaxKind::RawText,

            // Declarations (100-119)
            100 => SyntaxKind::CompilationUnit,
            101 => SyntaxKind::NamespaceDecl,
            102 => SyntaxKind::ClassDecl,
            103 => SyntaxKind::StructDecl,
            104 => SyntaxKind::InterfaceDecl,
            105 => SyntaxKind::EnumDecl,
            106 => SyntaxKind::DelegateDecl,
            107 => SyntaxKind::FieldDecl,
            108 => SyntaxKind::EventFieldDecl,
            109 => SyntaxKind::EventDecl,
            110 => SyntaxKind::PropertyDecl,
            111 => SyntaxKind::IndexerDecl,
            112 => SyntaxKind::ConstructorDecl,
            113 => SyntaxKind::DestructorDecl,
            114 => SyntaxKind::MethodDecl,
            115 => SyntaxKind::OperatorDecl,
            116 => SyntaxKind::ConversionOperatorDecl,
            117 => SyntaxKind::IncompleteMember,

            // Declaration parts (120-139)
            120 => SyntaxKind::AttributeList,
            121 => SyntaxKind::Attribute,
            122 => SyntaxKind::ModifierList,
            123 => SyntaxKind::Modifier,
            124 => SyntaxKind::TypeRef,
            125 => SyntaxKind::ParameterList,
            126 => SyntaxKind::Parameter,
            127 => SyntaxKind::AccessorList,

            // Statements (140-159)
            140 => SyntaxKind::Block,
            141 => SyntaxKind::ExprStmt,
            142 => SyntaxKind::LocalDeclStmt,
            143 => SyntaxKind::LabeledStmt,
            144 => SyntaxKind::ReturnStmt,
            145 => SyntaxKind::BreakStmt,
            146 => SyntaxKind::EmptyStmt,
            147 => SyntaxKind::IfStmt,
            148 => SyntaxKind::ElseClause,
            149 => SyntaxKind::SwitchStmt,
            150 => SyntaxKind::SwitchSection,
            151 => SyntaxKind::SwitchLabel,
            152 => SyntaxKind::WhileStmt,
            153 => SyntaxKind::ForEachStmt,

            // Expressions and argument lists (160-179)
            160 => SyntaxKind::Expr,
            161 => SyntaxKind::InvocationExpr,
            162 => SyntaxKind::ObjectCreationExpr,
            163 => SyntaxKind::ElementAccessExpr,
            164 => SyntaxKind::ArgumentList,
            165 => SyntaxKind::BracketedArgumentList,
            166 => SyntaxKind::AttributeArgumentList,
            167 => SyntaxKind::Argument,
            168 => SyntaxKind::AttributeArgument,
            169 => SyntaxKind::NameColon,
            170 => SyntaxKind::NameEquals,

            // Special (400+)
            400 => SyntaxKind::Error,
            401 => SyntaxKind::Unknown,

            _ => {
                tracing::warn!("Unknown syntax kind: {}", raw.0);
                SyntaxKind::Unknown
            }
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

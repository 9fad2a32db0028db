// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Tag kind classification for Ada declarations.
//!
//! Every tag carries a [`TagKind`] describing what sort of declaration it
//! names: a package, a type, a record component, an entry, and so on. Most
//! kinds come in two flavours — a *specification* kind for declarations that
//! expose an interface without a body (`procedure Q;`), and a primary kind
//! for declarations that provide one (`procedure Q is … end Q;`).
//!
//! Each emittable kind has a [`KindDescriptor`] giving its one-letter code,
//! its long name, and whether tags of that kind are produced by default.
//! Hosts toggle individual kinds through
//! [`KindFilter`](crate::options::KindFilter).
//!
//! Two kinds never appear in emitted tags: [`TagKind::Separate`] names the
//! synthetic parent of a `separate (…)` sub-unit, and [`TagKind::Undefined`]
//! marks the root sentinel and declarations whose spec form does not exist.

/// The kind of declaration a tag names.
///
/// The first two variants are internal sentinels; the rest correspond
/// one-to-one to rows of the descriptor table and are host-visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Synthetic parent carrying the enclosing unit name of a `separate`
    /// sub-unit. Never emitted.
    Separate,
    /// Root sentinel and failed spec promotions. Never emitted.
    Undefined,
    /// A package specification: `package P is … end P;` terminated before
    /// any body, or `package P;`.
    PackageSpec,
    /// A package with a body.
    Package,
    /// An incomplete or private type declaration: `type T;`.
    TypeSpec,
    /// A full type declaration.
    Type,
    /// A subtype specification.
    SubtypeSpec,
    /// A subtype declaration.
    Subtype,
    /// A record type component.
    Component,
    /// An enumeration type literal.
    Literal,
    /// A variable specification.
    VariableSpec,
    /// A variable declaration.
    Variable,
    /// A generic formal parameter.
    Formal,
    /// A constant declaration.
    Constant,
    /// A user-defined exception declaration.
    Exception,
    /// A subprogram specification: `procedure Q;` or `function F (…) return T;`.
    SubprogramSpec,
    /// A subprogram with a body.
    Subprogram,
    /// A task specification.
    TaskSpec,
    /// A task with a body.
    Task,
    /// A protected-data specification.
    ProtectedSpec,
    /// Protected data with a body.
    Protected,
    /// A task or protected-data entry specification.
    EntrySpec,
    /// A task or protected-data entry (including `accept` bodies).
    Entry,
    /// A `<<label>>` statement label.
    Label,
    /// A loop or declare-block identifier.
    Identifier,
    /// An automatic variable: a subprogram parameter, discriminant, loop
    /// iterator, or exception-choice name.
    AutomaticVariable,
    /// A loop or block with no identifier of its own.
    Anonymous,
}

/// Host-visible attributes of one emittable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindDescriptor {
    /// One-letter code, unique across the table.
    pub letter: char,
    /// Long name as written into tag files.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Whether tags of this kind are emitted by default.
    pub enabled: bool,
}

/// Descriptor table, in [`TagKind`] declaration order starting at
/// [`TagKind::PackageSpec`].
pub(crate) const KIND_TABLE: [KindDescriptor; TagKind::COUNT] = [
    KindDescriptor { letter: 'P', name: "packspec", description: "package specifications", enabled: false },
    KindDescriptor { letter: 'p', name: "package", description: "packages", enabled: true },
    KindDescriptor { letter: 'T', name: "typespec", description: "type specifications", enabled: false },
    KindDescriptor { letter: 't', name: "type", description: "types", enabled: true },
    KindDescriptor { letter: 'U', name: "subspec", description: "subtype specifications", enabled: false },
    KindDescriptor { letter: 'u', name: "subtype", description: "subtypes", enabled: true },
    KindDescriptor { letter: 'c', name: "component", description: "record type components", enabled: true },
    KindDescriptor { letter: 'l', name: "literal", description: "enum type literals", enabled: true },
    KindDescriptor { letter: 'V', name: "varspec", description: "variable specifications", enabled: false },
    KindDescriptor { letter: 'v', name: "variable", description: "variables", enabled: true },
    KindDescriptor { letter: 'f', name: "formal", description: "generic formal parameters", enabled: true },
    KindDescriptor { letter: 'n', name: "constant", description: "constants", enabled: true },
    KindDescriptor { letter: 'x', name: "exception", description: "user defined exceptions", enabled: true },
    KindDescriptor { letter: 'R', name: "subprogspec", description: "subprogram specifications", enabled: true },
    KindDescriptor { letter: 'r', name: "subprogram", description: "subprograms", enabled: true },
    KindDescriptor { letter: 'K', name: "taskspec", description: "task specifications", enabled: true },
    KindDescriptor { letter: 'k', name: "task", description: "tasks", enabled: true },
    KindDescriptor { letter: 'O', name: "protectspec", description: "protected data specifications", enabled: true },
    KindDescriptor { letter: 'o', name: "protected", description: "protected data", enabled: true },
    KindDescriptor { letter: 'E', name: "entryspec", description: "task/protected data entry specifications", enabled: false },
    KindDescriptor { letter: 'e', name: "entry", description: "task/protected data entries", enabled: true },
    KindDescriptor { letter: 'b', name: "label", description: "labels", enabled: true },
    KindDescriptor { letter: 'i', name: "identifier", description: "loop/declare identifiers", enabled: true },
    KindDescriptor { letter: 'a', name: "autovar", description: "automatic variables", enabled: false },
    KindDescriptor { letter: 'y', name: "annon", description: "loops and blocks with no identifier", enabled: false },
];

impl TagKind {
    /// Number of emittable kinds (table rows).
    pub const COUNT: usize = 25;

    /// Index into the descriptor table, or `None` for the sentinels.
    pub(crate) fn index(self) -> Option<usize> {
        match self {
            Self::Separate | Self::Undefined => None,
            kind => Some(kind as usize - 2),
        }
    }

    /// The descriptor for this kind, or `None` for the sentinels.
    #[must_use]
    pub fn descriptor(self) -> Option<&'static KindDescriptor> {
        self.index().map(|i| &KIND_TABLE[i])
    }

    /// The long name written into tag records, or `None` for the sentinels.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        self.descriptor().map(|d| d.name)
    }

    /// The specification counterpart of this kind.
    ///
    /// Applied once, at emit time, to tokens whose declaration turned out to
    /// have no body. Kinds without a spec form collapse to
    /// [`TagKind::Undefined`] and are not emitted.
    #[must_use]
    pub fn to_spec(self) -> Self {
        match self {
            Self::Package => Self::PackageSpec,
            Self::Type => Self::TypeSpec,
            Self::Subtype => Self::SubtypeSpec,
            Self::Variable => Self::VariableSpec,
            Self::Subprogram => Self::SubprogramSpec,
            Self::Task => Self::TaskSpec,
            Self::Protected => Self::ProtectedSpec,
            Self::Entry => Self::EntrySpec,
            _ => Self::Undefined,
        }
    }

    /// Whether qualified (dotted) variants are emitted for this kind when
    /// the host asks for them. Kinds whose names only mean something inside
    /// their immediate parent never qualify.
    pub(crate) fn takes_qualified_name(self) -> bool {
        !matches!(
            self,
            Self::Component
                | Self::Literal
                | Self::Formal
                | Self::Label
                | Self::Identifier
                | Self::AutomaticVariable
                | Self::Anonymous
        )
    }

    /// Whether this kind names a generic subject that pending formal
    /// parameters attach to.
    pub(crate) fn attaches_formals(self) -> bool {
        matches!(self, Self::Package | Self::Subprogram | Self::Task | Self::Protected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_have_no_descriptor() {
        assert!(TagKind::Separate.descriptor().is_none());
        assert!(TagKind::Undefined.descriptor().is_none());
    }

    #[test]
    fn descriptor_lookup_matches_declaration_order() {
        assert_eq!(TagKind::PackageSpec.name(), Some("packspec"));
        assert_eq!(TagKind::Package.name(), Some("package"));
        assert_eq!(TagKind::AutomaticVariable.name(), Some("autovar"));
        assert_eq!(TagKind::Anonymous.name(), Some("annon"));
    }

    #[test]
    fn letters_are_unique() {
        for (i, a) in KIND_TABLE.iter().enumerate() {
            for b in &KIND_TABLE[i + 1..] {
                assert_ne!(a.letter, b.letter, "{} and {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn spec_promotion_is_terminal() {
        assert_eq!(TagKind::Package.to_spec(), TagKind::PackageSpec);
        assert_eq!(TagKind::Entry.to_spec(), TagKind::EntrySpec);
        // A spec kind has no further spec form.
        assert_eq!(TagKind::PackageSpec.to_spec(), TagKind::Undefined);
        // Kinds without a spec form collapse to Undefined.
        assert_eq!(TagKind::Constant.to_spec(), TagKind::Undefined);
        assert_eq!(TagKind::Anonymous.to_spec(), TagKind::Undefined);
    }

    #[test]
    fn spec_kinds_are_mostly_off_by_default() {
        assert!(!TagKind::PackageSpec.descriptor().unwrap().enabled);
        assert!(!TagKind::TypeSpec.descriptor().unwrap().enabled);
        assert!(!TagKind::EntrySpec.descriptor().unwrap().enabled);
        assert!(TagKind::SubprogramSpec.descriptor().unwrap().enabled);
        assert!(TagKind::TaskSpec.descriptor().unwrap().enabled);
    }
}

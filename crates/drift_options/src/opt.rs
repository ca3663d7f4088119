//! The static option schema: spellings, kinds, groups, and attributes.

use std::fmt;

/// How an option consumes argv tokens.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OptionKind {
    /// The option takes no argument.
    Flag,
    /// The value is the remainder of the same token after the spelling.
    Joined,
    /// The value is the next argv token.
    Separate,
    /// Joined if the token has a suffix beyond the spelling, else separate.
    JoinedOrSeparate,
    /// Consumes the rest of argv into a multi-value argument.
    RemainingArgs,
}

/// Mutually related options where only the last occurrence matters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OptionGroup {
    /// Mode-selecting options (`-emit-object`, `-typecheck`, `-repl`, ...).
    Modes,
    /// Debug-info level options (`-g`, `-gline-tables-only`, ...).
    DebugInfo,
    /// Optimization level options (`-O`, `-Onone`).
    Optimization,
}

/// Boolean attribute flags attached to an option.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OptionAttrs {
    /// The option's argument is a path, rewritten by `-working-directory`.
    pub path_arg: bool,
    /// The option's presence feeds the incremental-build options hash.
    pub affects_incremental: bool,
    /// The option has no effect for the interactive driver.
    pub no_interactive: bool,
    /// The option is omitted from `-help` (shown by `-help-hidden`).
    pub hidden: bool,
}

impl OptionAttrs {
    /// No attributes set.
    pub const NONE: OptionAttrs = OptionAttrs {
        path_arg: false,
        affects_incremental: false,
        no_interactive: false,
        hidden: false,
    };
}

/// Every option the driver core recognizes.
///
/// Aliases (`-c`, `-v`, `-wmo`, `--help`) have their own variant so the
/// table stays keyed by spelling, but the parser records the canonical
/// option in the parsed log.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub enum Opt {
    // Modes group.
    EmitExecutable,
    EmitLibrary,
    EmitObject,
    EmitAssembly,
    EmitSil,
    EmitSilgen,
    EmitSib,
    EmitSibgen,
    EmitIr,
    EmitBc,
    EmitPch,
    EmitPcm,
    EmitImportedModules,
    EmitModule,
    IndexFile,
    UpdateCode,
    DumpAst,
    Parse,
    ResolveImports,
    Typecheck,
    DumpParse,
    EmitSyntax,
    PrintAst,
    DumpTypeRefinementContexts,
    DumpScopeMaps,
    DumpInterfaceHash,
    DumpTypeInfo,
    VerifyDebugInfo,
    Repl,
    DeprecatedIntegratedRepl,
    LldbRepl,
    Immediate,

    // Debug-info group.
    G,
    GlineTablesOnly,
    GdwarfTypes,
    Gnone,

    // Optimization group.
    O,
    Onone,

    // Value options.
    Output,
    ModuleName,
    EmitModulePath,
    WorkingDirectory,
    DebugInfoFormat,
    DriverMode,
    OutputFileMap,
    DashDash,

    // Flags.
    Static,
    WholeModuleOptimization,
    ParseAsLibrary,
    ParseStdlib,
    Incremental,
    EnableBatchMode,
    DisableBatchMode,
    DriverShowIncremental,
    DriverVerifyDependencyGraph,
    Help,
    HelpHidden,
    Version,
    Frontend,
    Modulewrap,

    // Aliases.
    C,
    V,
    Wmo,
    HelpLong,
}

/// A single entry in the option schema.
#[derive(Clone, Copy, Debug)]
pub struct OptionDef {
    /// The option this entry describes.
    pub opt: Opt,
    /// The user-visible flag text. Unique across the table.
    pub spelling: &'static str,
    /// How the option consumes argv tokens.
    pub kind: OptionKind,
    /// Optional group membership for last-wins lookups.
    pub group: Option<OptionGroup>,
    /// Canonical option this spelling is an alias for, if any.
    pub alias_of: Option<Opt>,
    /// Attribute flags.
    pub attrs: OptionAttrs,
}

impl OptionDef {
    const fn new(opt: Opt, spelling: &'static str, kind: OptionKind) -> Self {
        Self {
            opt,
            spelling,
            kind,
            group: None,
            alias_of: None,
            attrs: OptionAttrs::NONE,
        }
    }

    const fn flag(opt: Opt, spelling: &'static str) -> Self {
        Self::new(opt, spelling, OptionKind::Flag)
    }

    const fn mode(opt: Opt, spelling: &'static str) -> Self {
        Self::flag(opt, spelling).group(OptionGroup::Modes).incr()
    }

    const fn group(mut self, group: OptionGroup) -> Self {
        self.group = Some(group);
        self
    }

    const fn alias(mut self, target: Opt) -> Self {
        self.alias_of = Some(target);
        self
    }

    const fn path(mut self) -> Self {
        self.attrs.path_arg = true;
        self
    }

    const fn incr(mut self) -> Self {
        self.attrs.affects_incremental = true;
        self
    }

    const fn no_interactive(mut self) -> Self {
        self.attrs.no_interactive = true;
        self
    }

    const fn hidden(mut self) -> Self {
        self.attrs.hidden = true;
        self
    }

    /// The option this entry resolves to after following its alias, if any.
    pub fn canonical(&self) -> Opt {
        self.alias_of.unwrap_or(self.opt)
    }
}

/// The full option schema, in help-rendering order.
pub const OPTION_DEFS: &[OptionDef] = &[
    // Modes.
    OptionDef::mode(Opt::EmitExecutable, "-emit-executable").no_interactive(),
    OptionDef::mode(Opt::EmitLibrary, "-emit-library").no_interactive(),
    OptionDef::mode(Opt::EmitObject, "-emit-object").no_interactive(),
    OptionDef::mode(Opt::EmitAssembly, "-emit-assembly").no_interactive(),
    OptionDef::mode(Opt::EmitSil, "-emit-sil"),
    OptionDef::mode(Opt::EmitSilgen, "-emit-silgen"),
    OptionDef::mode(Opt::EmitSib, "-emit-sib"),
    OptionDef::mode(Opt::EmitSibgen, "-emit-sibgen"),
    OptionDef::mode(Opt::EmitIr, "-emit-ir"),
    OptionDef::mode(Opt::EmitBc, "-emit-bc"),
    OptionDef::mode(Opt::EmitPch, "-emit-pch"),
    OptionDef::mode(Opt::EmitPcm, "-emit-pcm"),
    OptionDef::mode(Opt::EmitImportedModules, "-emit-imported-modules"),
    OptionDef::mode(Opt::EmitModule, "-emit-module"),
    OptionDef::mode(Opt::IndexFile, "-index-file"),
    OptionDef::mode(Opt::UpdateCode, "-update-code"),
    OptionDef::mode(Opt::DumpAst, "-dump-ast"),
    OptionDef::mode(Opt::Parse, "-parse"),
    OptionDef::mode(Opt::ResolveImports, "-resolve-imports"),
    OptionDef::mode(Opt::Typecheck, "-typecheck"),
    OptionDef::mode(Opt::DumpParse, "-dump-parse"),
    OptionDef::mode(Opt::EmitSyntax, "-emit-syntax"),
    OptionDef::mode(Opt::PrintAst, "-print-ast"),
    OptionDef::mode(
        Opt::DumpTypeRefinementContexts,
        "-dump-type-refinement-contexts",
    ),
    OptionDef::mode(Opt::DumpScopeMaps, "-dump-scope-maps"),
    OptionDef::mode(Opt::DumpInterfaceHash, "-dump-interface-hash"),
    OptionDef::mode(Opt::DumpTypeInfo, "-dump-type-info"),
    OptionDef::mode(Opt::VerifyDebugInfo, "-verify-debug-info"),
    OptionDef::mode(Opt::Repl, "-repl"),
    OptionDef::mode(Opt::DeprecatedIntegratedRepl, "-deprecated-integrated-repl").hidden(),
    OptionDef::mode(Opt::LldbRepl, "-lldb-repl").hidden(),
    OptionDef::mode(Opt::Immediate, "-i"),
    // Debug info.
    OptionDef::flag(Opt::G, "-g").group(OptionGroup::DebugInfo).incr(),
    OptionDef::flag(Opt::GlineTablesOnly, "-gline-tables-only")
        .group(OptionGroup::DebugInfo)
        .incr(),
    OptionDef::flag(Opt::GdwarfTypes, "-gdwarf-types")
        .group(OptionGroup::DebugInfo)
        .incr(),
    OptionDef::flag(Opt::Gnone, "-gnone").group(OptionGroup::DebugInfo).incr(),
    // Optimization.
    OptionDef::flag(Opt::O, "-O").group(OptionGroup::Optimization).incr(),
    OptionDef::flag(Opt::Onone, "-Onone").group(OptionGroup::Optimization).incr(),
    // Value options.
    OptionDef::new(Opt::Output, "-o", OptionKind::JoinedOrSeparate).path(),
    OptionDef::new(Opt::ModuleName, "-module-name", OptionKind::Separate).incr(),
    OptionDef::new(Opt::EmitModulePath, "-emit-module-path", OptionKind::JoinedOrSeparate)
        .path()
        .incr(),
    OptionDef::new(Opt::WorkingDirectory, "-working-directory", OptionKind::Separate),
    OptionDef::new(Opt::DebugInfoFormat, "-debug-info-format=", OptionKind::Joined).incr(),
    OptionDef::new(Opt::DriverMode, "--driver-mode=", OptionKind::Joined).hidden(),
    OptionDef::new(Opt::OutputFileMap, "-output-file-map", OptionKind::Separate)
        .path()
        .no_interactive(),
    OptionDef::new(Opt::DashDash, "--", OptionKind::RemainingArgs).hidden(),
    // Flags.
    OptionDef::flag(Opt::Static, "-static").incr().no_interactive(),
    OptionDef::flag(Opt::WholeModuleOptimization, "-whole-module-optimization")
        .incr()
        .no_interactive(),
    OptionDef::flag(Opt::ParseAsLibrary, "-parse-as-library").incr(),
    OptionDef::flag(Opt::ParseStdlib, "-parse-stdlib").incr(),
    OptionDef::flag(Opt::Incremental, "-incremental").no_interactive(),
    OptionDef::flag(Opt::EnableBatchMode, "-enable-batch-mode").incr().no_interactive(),
    OptionDef::flag(Opt::DisableBatchMode, "-disable-batch-mode").incr().no_interactive(),
    OptionDef::flag(Opt::DriverShowIncremental, "-driver-show-incremental").hidden(),
    OptionDef::flag(Opt::DriverVerifyDependencyGraph, "-driver-verify-dependency-graph").hidden(),
    OptionDef::flag(Opt::Help, "-help"),
    OptionDef::flag(Opt::HelpHidden, "-help-hidden"),
    OptionDef::flag(Opt::Version, "-version"),
    OptionDef::flag(Opt::Frontend, "-frontend").hidden(),
    OptionDef::flag(Opt::Modulewrap, "-modulewrap").hidden(),
    // Aliases.
    OptionDef::flag(Opt::C, "-c").alias(Opt::EmitObject).group(OptionGroup::Modes).incr(),
    OptionDef::flag(Opt::V, "-v").alias(Opt::Version),
    OptionDef::flag(Opt::Wmo, "-wmo")
        .alias(Opt::WholeModuleOptimization)
        .incr()
        .no_interactive(),
    OptionDef::flag(Opt::HelpLong, "--help").alias(Opt::Help),
];

impl Opt {
    /// Returns the schema entry for this option.
    ///
    /// # Panics
    ///
    /// Panics if the option has no table entry; the table is
    /// compile-time data, so that is a schema bug.
    pub fn def(self) -> &'static OptionDef {
        OPTION_DEFS
            .iter()
            .find(|d| d.opt == self)
            .expect("option missing from schema table")
    }

    /// The canonical spelling of this option.
    pub fn spelling(self) -> &'static str {
        self.def().spelling
    }

    /// The group this option belongs to, if any.
    pub fn group(self) -> Option<OptionGroup> {
        self.def().group
    }

    /// The attribute flags of this option.
    pub fn attrs(self) -> OptionAttrs {
        self.def().attrs
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

//! Project kinds and the fixed data attached to each of them
//!
//! A Wolfox stack is made of two sibling projects. Each [`ProjectKind`] knows:
//! - the suffix appended to the project name to form its folder
//! - the name of its template root under the templates directory
//! - the dependencies installed into it
//! - the static configuration files copied into it

use std::fmt;

/// Runtime and development dependencies for one project kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencySet {
    /// Installed as regular dependencies
    pub main: &'static [&'static str],
    /// Installed as development dependencies
    pub dev: &'static [&'static str],
}

/// Dependencies of the backend project
pub const BACKEND_DEPENDENCIES: DependencySet = DependencySet {
    main: &[
        "@frenchpastries/arrange",
        "@frenchpastries/assemble",
        "@frenchpastries/millefeuille",
        "dotenv",
        "pg",
    ],
    dev: &["eslint", "nodemon"],
};

/// Dependencies of the frontend project
pub const FRONTEND_DEPENDENCIES: DependencySet = DependencySet {
    main: &["hyperapp", "hyperapp-style"],
    dev: &[
        "@babel/core",
        "@babel/plugin-syntax-dynamic-import",
        "@babel/plugin-transform-react-jsx",
        "@babel/preset-env",
        "babel-eslint",
        "babel-loader",
        "clean-webpack-plugin",
        "eslint",
        "eslint-plugin-react",
        "file-loader",
        "html-webpack-plugin",
        "hyperapp-redux-devtools",
        "webpack",
        "webpack-cli",
        "webpack-dev-server",
        "webpack-merge",
    ],
};

/// Lint configuration, copied into every project
pub const LINT_CONFIG_FILE: &str = ".eslintrc.json";

/// Transpiler configuration, copied into frontend projects only
pub const TRANSPILER_CONFIG_FILE: &str = ".babelrc";

/// Reference manifest shipped in every template root
pub const MANIFEST_FILE: &str = "package.json";

/// The two halves of a Wolfox stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    Backend,
    Frontend,
}

impl ProjectKind {
    /// Both kinds, in the order they are built
    pub const ALL: [ProjectKind; 2] = [ProjectKind::Backend, ProjectKind::Frontend];

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectKind::Backend => "backend",
            ProjectKind::Frontend => "frontend",
        }
    }

    /// Suffix appended to the project name to form the folder name
    pub fn suffix(&self) -> &'static str {
        match self {
            ProjectKind::Backend => "-back",
            ProjectKind::Frontend => "-front",
        }
    }

    /// Directory name of this kind's template root, relative to the templates directory
    pub fn template_dir_name(&self) -> &'static str {
        match self {
            ProjectKind::Backend => "backend",
            ProjectKind::Frontend => "frontend",
        }
    }

    pub fn dependencies(&self) -> &'static DependencySet {
        match self {
            ProjectKind::Backend => &BACKEND_DEPENDENCIES,
            ProjectKind::Frontend => &FRONTEND_DEPENDENCIES,
        }
    }

    /// Whether the `config` template subtree is copied
    pub fn has_config_tree(&self) -> bool {
        matches!(self, ProjectKind::Frontend)
    }

    /// Static files copied verbatim from the template root, in copy order
    pub fn static_files(&self) -> &'static [&'static str] {
        match self {
            ProjectKind::Backend => &[LINT_CONFIG_FILE],
            ProjectKind::Frontend => &[LINT_CONFIG_FILE, TRANSPILER_CONFIG_FILE],
        }
    }

    /// Folder name for a project of this kind
    pub fn folder_name(&self, project_name: &str) -> String {
        format!("{}{}", project_name, self.suffix())
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

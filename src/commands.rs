//! Command synthesis: language defaults with framework overrides per phase
//!
//! Every command is assembled from fixed text, enum-derived executable names,
//! root file names drawn from fixed candidate lists, and the numeric port.
//! Repository content never reaches a generated command line.

use crate::bootstrap::RepositoryInput;
use crate::extractors::dependencies::package_json_scripts;
use crate::output::Phase;
use crate::stack::{FrameworkId, LanguageFamily, LanguageId, PackageManagerId};
use std::collections::{BTreeMap, BTreeSet};

pub type CommandMap = BTreeMap<Phase, Vec<String>>;

/// Facts about the repository layout that select command branches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectLayout {
    root_files: BTreeSet<String>,
    top_dirs: BTreeSet<String>,
    /// `None` when there is no readable root package.json
    scripts: Option<BTreeSet<String>>,
}

impl ProjectLayout {
    pub fn from_input(input: &RepositoryInput) -> Self {
        let mut root_files = BTreeSet::new();
        let mut top_dirs = BTreeSet::new();
        for path in &input.file_paths {
            match path.split_once('/') {
                Some((dir, _)) => {
                    top_dirs.insert(dir.to_string());
                }
                None => {
                    root_files.insert(path.clone());
                }
            }
        }
        root_files.extend(
            input
                .manifest_contents
                .keys()
                .filter(|k| !k.contains('/'))
                .cloned(),
        );

        let scripts = input.root_content("package.json").and_then(package_json_scripts);

        Self {
            root_files,
            top_dirs,
            scripts,
        }
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.root_files.contains(name)
    }

    pub fn has_dir(&self, name: &str) -> bool {
        self.top_dirs.contains(name)
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.as_ref().is_some_and(|s| s.contains(name))
    }

    /// First candidate present at the root
    pub fn first_existing<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|c| self.has_file(c))
    }

    /// Python projects managed with uv: a uv.lock, or a pyproject.toml without requirements.txt
    pub fn uses_uv(&self) -> bool {
        self.has_file("uv.lock")
            || (self.has_file("pyproject.toml") && !self.has_file("requirements.txt"))
    }

    /// uv choice for a Python project; Poetry and Pipenv lockfiles take precedence over the layout
    pub fn python_uses_uv(&self, package_manager: &PackageManagerId) -> bool {
        match package_manager {
            PackageManagerId::Uv => true,
            PackageManagerId::Poetry | PackageManagerId::Pipenv => false,
            _ => self.uses_uv(),
        }
    }
}

/// Everything the synthesizer looks at
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub language: &'a LanguageId,
    pub framework: &'a FrameworkId,
    pub package_manager: &'a PackageManagerId,
    pub port: u16,
    pub layout: &'a ProjectLayout,
}

#[derive(Debug, Default)]
struct CommandTable(CommandMap);

impl CommandTable {
    fn set<I, S>(&mut self, phase: Phase, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(phase, commands.into_iter().map(Into::into).collect());
    }

    fn set_one(&mut self, phase: Phase, command: impl Into<String>) {
        self.set(phase, [command.into()]);
    }

    fn get(&self, phase: Phase) -> Vec<String> {
        self.0.get(&phase).cloned().unwrap_or_default()
    }

    /// Overrides replace only the phases they define
    fn apply(&mut self, overrides: CommandTable) {
        self.0.extend(overrides.0);
    }

    fn finish(self) -> CommandMap {
        self.0
            .into_iter()
            .filter_map(|(phase, mut commands)| {
                commands.retain(|c| !c.trim().is_empty());
                commands.dedup();
                (!commands.is_empty()).then_some((phase, commands))
            })
            .collect()
    }
}

pub fn synthesize_commands(ctx: &CommandContext<'_>) -> CommandMap {
    let (mut table, overrides) = match ctx.language.family() {
        LanguageFamily::Python => (python_defaults(ctx), python_overrides(ctx)),
        LanguageFamily::JavaScript => (javascript_defaults(ctx), javascript_overrides(ctx)),
        LanguageFamily::Java => (java_defaults(ctx), java_overrides(ctx)),
        LanguageFamily::Go => (go_defaults(ctx), CommandTable::default()),
        LanguageFamily::Rust => (rust_defaults(), CommandTable::default()),
        LanguageFamily::Php => (php_defaults(ctx), php_overrides(ctx)),
        LanguageFamily::Ruby => (ruby_defaults(ctx), ruby_overrides(ctx)),
        LanguageFamily::Native => (native_defaults(ctx), CommandTable::default()),
        LanguageFamily::Other => (CommandTable::default(), CommandTable::default()),
    };
    table.apply(overrides);
    table.finish()
}

// Python

fn python_runner(ctx: &CommandContext<'_>) -> &'static str {
    if ctx.layout.python_uses_uv(ctx.package_manager) {
        "uv run "
    } else {
        match ctx.package_manager {
            PackageManagerId::Poetry => "poetry run ",
            PackageManagerId::Pipenv => "pipenv run ",
            _ => "",
        }
    }
}

fn python_defaults(ctx: &CommandContext<'_>) -> CommandTable {
    let layout = ctx.layout;
    let run = python_runner(ctx);
    let mut table = CommandTable::default();

    if layout.python_uses_uv(ctx.package_manager) {
        table.set_one(Phase::Setup, "uv venv");
        table.set_one(Phase::Install, "uv sync");
    } else {
        let install = match ctx.package_manager {
            PackageManagerId::Poetry => Some("poetry install"),
            PackageManagerId::Pipenv => Some("pipenv install"),
            _ if layout.has_file("requirements.txt") => Some("pip install -r requirements.txt"),
            _ if layout.has_file("pyproject.toml") => Some("pip install ."),
            _ if layout.has_file("setup.py") => Some("pip install -e ."),
            _ => None,
        };
        if let Some(install) = install {
            table.set_one(Phase::Install, install);
        }
    }

    if let Some(entry) = layout.first_existing(&["main.py", "app.py", "run.py", "server.py"]) {
        table.set_one(Phase::Run, format!("{}python {}", run, entry));
    }
    table.set_one(Phase::Test, format!("{}python -m pytest", run));
    table
}

fn python_overrides(ctx: &CommandContext<'_>) -> CommandTable {
    let layout = ctx.layout;
    let run = python_runner(ctx);
    let port = ctx.port;
    let mut table = CommandTable::default();

    match ctx.framework {
        FrameworkId::Django => {
            let mut setup = python_defaults(ctx).get(Phase::Setup);
            setup.push(format!("{}python manage.py migrate", run));
            setup.push(format!("{}python manage.py collectstatic --noinput", run));
            table.set(Phase::Setup, setup);
            table.set_one(
                Phase::Run,
                format!("{}python manage.py runserver 0.0.0.0:{}", run, port),
            );
            table.set_one(Phase::Test, format!("{}python manage.py test", run));
        }
        FrameworkId::Flask => {
            let command = if layout.has_file("app.py") {
                format!("{}python app.py", run)
            } else {
                format!("{}flask run --host 0.0.0.0 --port {}", run, port)
            };
            table.set_one(Phase::Run, command);
        }
        FrameworkId::FastApi => {
            let module = layout
                .first_existing(&["main.py", "app.py"])
                .and_then(|f| f.strip_suffix(".py"))
                .unwrap_or("main");
            table.set_one(
                Phase::Run,
                format!("{}uvicorn {}:app --host 0.0.0.0 --port {}", run, module, port),
            );
        }
        _ => {}
    }
    table
}

// JavaScript / TypeScript

fn script_command(pm: &PackageManagerId, script: &str) -> String {
    match (pm.node_cli(), script) {
        ("npm", "start") | ("npm", "test") => format!("npm {}", script),
        ("npm", _) => format!("npm run {}", script),
        ("bun", _) => format!("bun run {}", script),
        (cli, _) => format!("{} {}", cli, script),
    }
}

fn javascript_defaults(ctx: &CommandContext<'_>) -> CommandTable {
    let layout = ctx.layout;
    let pm = ctx.package_manager;
    let mut table = CommandTable::default();

    if layout.has_file("package.json") {
        table.set_one(Phase::Install, format!("{} install", pm.node_cli()));
    }
    if layout.has_script("build") {
        table.set_one(Phase::Build, script_command(pm, "build"));
    }
    if layout.has_script("start") {
        table.set_one(Phase::Run, script_command(pm, "start"));
    } else if layout.has_script("dev") {
        table.set_one(Phase::Run, script_command(pm, "dev"));
    } else if let Some(entry) =
        layout.first_existing(&["server.js", "index.js", "app.js", "main.js"])
    {
        table.set_one(Phase::Run, format!("node {}", entry));
    }
    if layout.has_script("test") {
        table.set_one(Phase::Test, script_command(pm, "test"));
    }
    table
}

fn javascript_overrides(ctx: &CommandContext<'_>) -> CommandTable {
    let layout = ctx.layout;
    let pm = ctx.package_manager;
    let mut table = CommandTable::default();

    match ctx.framework {
        FrameworkId::NextJs | FrameworkId::Nuxt => {
            table.set_one(Phase::Build, script_command(pm, "build"));
            table.set_one(Phase::Run, script_command(pm, "start"));
        }
        FrameworkId::React | FrameworkId::Vue | FrameworkId::Angular | FrameworkId::Gatsby => {
            table.set_one(Phase::Build, script_command(pm, "build"));
            if !layout.has_script("start") {
                table.set_one(Phase::Run, script_command(pm, "start"));
            }
        }
        FrameworkId::Express | FrameworkId::Fastify => {
            if !layout.has_script("start") {
                let entry = layout
                    .first_existing(&["server.js", "index.js", "app.js"])
                    .unwrap_or("server.js");
                table.set_one(Phase::Run, format!("node {}", entry));
            }
        }
        _ => {}
    }
    table
}

// Java / Kotlin / Scala

fn gradle_cli(layout: &ProjectLayout) -> &'static str {
    if layout.has_file("gradlew") {
        "./gradlew"
    } else {
        "gradle"
    }
}

fn java_defaults(ctx: &CommandContext<'_>) -> CommandTable {
    let layout = ctx.layout;
    let mut table = CommandTable::default();

    let gradle = *ctx.package_manager == PackageManagerId::Gradle
        || (!layout.has_file("pom.xml")
            && (layout.has_file("build.gradle") || layout.has_file("build.gradle.kts")));

    if gradle {
        let cli = gradle_cli(layout);
        table.set_one(Phase::Install, format!("{} dependencies", cli));
        table.set_one(Phase::Build, format!("{} build -x test", cli));
        table.set_one(Phase::Run, "java -jar build/libs/*.jar");
        table.set_one(Phase::Test, format!("{} test", cli));
    } else if layout.has_file("pom.xml") || *ctx.package_manager == PackageManagerId::Maven {
        table.set_one(Phase::Install, "mvn dependency:resolve");
        table.set_one(Phase::Build, "mvn package -DskipTests");
        table.set_one(Phase::Run, "java -jar target/*.jar");
        table.set_one(Phase::Test, "mvn test");
    }
    table
}

fn java_overrides(ctx: &CommandContext<'_>) -> CommandTable {
    let mut table = CommandTable::default();
    if *ctx.framework == FrameworkId::Spring {
        if ctx.layout.has_file("pom.xml") {
            table.set_one(Phase::Run, "mvn spring-boot:run");
        } else if ctx.layout.has_file("build.gradle") || ctx.layout.has_file("build.gradle.kts") {
            table.set_one(Phase::Run, format!("{} bootRun", gradle_cli(ctx.layout)));
        }
    }
    table
}

// Go

fn go_defaults(ctx: &CommandContext<'_>) -> CommandTable {
    let mut table = CommandTable::default();
    if ctx.layout.has_file("go.mod") {
        table.set_one(Phase::Install, "go mod download");
    } else {
        table.set_one(Phase::Install, "go get ./...");
    }
    table.set_one(Phase::Build, "go build -o app .");
    table.set_one(Phase::Run, "./app");
    table.set_one(Phase::Test, "go test ./...");
    table
}

// Rust

fn rust_defaults() -> CommandTable {
    let mut table = CommandTable::default();
    table.set_one(Phase::Install, "cargo fetch");
    table.set_one(Phase::Build, "cargo build --release");
    table.set_one(Phase::Run, "cargo run --release");
    table.set_one(Phase::Test, "cargo test");
    table
}

// PHP

fn php_defaults(ctx: &CommandContext<'_>) -> CommandTable {
    let mut table = CommandTable::default();
    if ctx.layout.has_file("composer.json") {
        table.set_one(Phase::Install, "composer install --no-dev --optimize-autoloader");
        table.set_one(Phase::Test, "vendor/bin/phpunit");
    }
    let run = if ctx.layout.has_dir("public") {
        format!("php -S 0.0.0.0:{} -t public", ctx.port)
    } else {
        format!("php -S 0.0.0.0:{}", ctx.port)
    };
    table.set_one(Phase::Run, run);
    table
}

fn php_overrides(ctx: &CommandContext<'_>) -> CommandTable {
    let mut table = CommandTable::default();
    if *ctx.framework == FrameworkId::Laravel {
        table.set(
            Phase::Setup,
            ["php artisan key:generate --force", "php artisan migrate --force"],
        );
        table.set_one(
            Phase::Run,
            format!("php artisan serve --host=0.0.0.0 --port={}", ctx.port),
        );
        table.set_one(Phase::Test, "php artisan test");
    }
    table
}

// Ruby

fn ruby_defaults(ctx: &CommandContext<'_>) -> CommandTable {
    let layout = ctx.layout;
    let mut table = CommandTable::default();
    if layout.has_file("Gemfile") {
        table.set_one(Phase::Install, "bundle install");
    }
    if layout.has_file("config.ru") {
        table.set_one(
            Phase::Run,
            format!("bundle exec rackup --host 0.0.0.0 --port {}", ctx.port),
        );
    } else if let Some(entry) = layout.first_existing(&["app.rb", "main.rb", "server.rb"]) {
        table.set_one(Phase::Run, format!("ruby {}", entry));
    }
    if layout.has_dir("spec") {
        table.set_one(Phase::Test, "bundle exec rspec");
    } else {
        table.set_one(Phase::Test, "bundle exec rake test");
    }
    table
}

fn ruby_overrides(ctx: &CommandContext<'_>) -> CommandTable {
    let mut table = CommandTable::default();
    match ctx.framework {
        FrameworkId::Rails => {
            table.set_one(Phase::Setup, "bundle exec rails db:prepare");
            table.set_one(
                Phase::Run,
                format!("bundle exec rails server -b 0.0.0.0 -p {}", ctx.port),
            );
        }
        FrameworkId::Sinatra => {
            if let Some(entry) = ctx.layout.first_existing(&["app.rb", "main.rb", "server.rb"]) {
                table.set_one(
                    Phase::Run,
                    format!("bundle exec ruby {} -o 0.0.0.0 -p {}", entry, ctx.port),
                );
            }
        }
        _ => {}
    }
    table
}

// C / C++

fn native_defaults(ctx: &CommandContext<'_>) -> CommandTable {
    let mut table = CommandTable::default();
    if ctx.layout.has_file("CMakeLists.txt") {
        table.set(Phase::Build, ["cmake -S . -B build", "cmake --build build"]);
        table.set_one(Phase::Test, "ctest --test-dir build");
    } else if ctx.layout.has_file("Makefile") {
        table.set_one(Phase::Build, "make");
        table.set_one(Phase::Test, "make test");
    }
    table
}

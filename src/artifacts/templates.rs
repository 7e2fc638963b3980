//! Fixed template text. Only `{{name}}` placeholders vary between renders.

macro_rules! healthcheck {
    () => {
        "HEALTHCHECK --interval=30s --timeout=10s --start-period=5s --retries=3 \\\n    CMD {{health_check}}\n"
    };
}

macro_rules! python_head {
    () => {
        r#"FROM {{base_image}}

WORKDIR /app

ENV PYTHONDONTWRITEBYTECODE=1 \
    PYTHONUNBUFFERED=1

"#
    };
}

macro_rules! python_tail {
    () => {
        concat!(
            r#"
# Application code
COPY . .

RUN useradd -m -u 1000 appuser && chown -R appuser:appuser /app
USER appuser

EXPOSE {{port}}

"#,
            healthcheck!(),
            "\nCMD {{cmd}}\n"
        )
    };
}

pub const PYTHON_GENERIC: &str = concat!(
    python_head!(),
    r#"RUN apt-get update && apt-get install -y --no-install-recommends \
    gcc \
    curl \
    && rm -rf /var/lib/apt/lists/*

{{install_block}}
"#,
    python_tail!()
);

pub const PYTHON_FLASK: &str = concat!(
    python_head!(),
    r#"ENV FLASK_RUN_HOST=0.0.0.0 \
    FLASK_RUN_PORT={{port}}

RUN apt-get update && apt-get install -y --no-install-recommends \
    gcc \
    curl \
    && rm -rf /var/lib/apt/lists/*

{{install_block}}
"#,
    python_tail!()
);

pub const PYTHON_FASTAPI: &str = concat!(
    python_head!(),
    r#"RUN apt-get update && apt-get install -y --no-install-recommends \
    gcc \
    curl \
    && rm -rf /var/lib/apt/lists/*

{{install_block}}
"#,
    python_tail!()
);

pub const PYTHON_DJANGO: &str = concat!(
    python_head!(),
    r#"RUN apt-get update && apt-get install -y --no-install-recommends \
    gcc \
    curl \
    libpq-dev \
    postgresql-client \
    && rm -rf /var/lib/apt/lists/*

{{install_block}}

# Application code
COPY . .

RUN {{setup_cmd}}

RUN useradd -m -u 1000 appuser && chown -R appuser:appuser /app
USER appuser

EXPOSE {{port}}

"#,
    healthcheck!(),
    "\nCMD {{cmd}}\n"
);

pub const PYTHON_INSTALL_UV: &str = r#"# Dependencies (uv)
RUN pip install --no-cache-dir uv
COPY pyproject.toml uv.lock* requirements.txt* ./
RUN if [ -f uv.lock ]; then uv sync --frozen --no-install-project; \
    elif [ -f pyproject.toml ]; then uv sync --no-install-project; \
    else uv venv && uv pip install -r requirements.txt; fi
ENV PATH="/app/.venv/bin:$PATH"
"#;

pub const PYTHON_INSTALL_PIP: &str = r#"# Dependencies (pip)
COPY requirements.txt* ./
RUN if [ -f requirements.txt ]; then pip install --no-cache-dir -r requirements.txt; fi
"#;

pub const PYTHON_INSTALL_PIP_PROJECT: &str = r#"# Dependencies (pip, project metadata)
COPY . .
RUN pip install --no-cache-dir .
"#;

pub const PYTHON_INSTALL_POETRY: &str = r#"# Dependencies (poetry)
RUN pip install --no-cache-dir poetry && poetry config virtualenvs.create false
COPY pyproject.toml poetry.lock* ./
RUN poetry install --no-root --no-interaction
"#;

pub const PYTHON_INSTALL_PIPENV: &str = r#"# Dependencies (pipenv)
RUN pip install --no-cache-dir pipenv
COPY Pipfile Pipfile.lock* ./
RUN pipenv install --system --deploy
"#;

pub const NODE_INSTALL_NPM: &str = r#"COPY package*.json ./
RUN if [ -f package-lock.json ]; then npm ci; else npm install; fi
"#;

pub const NODE_INSTALL_YARN: &str = r#"COPY package.json yarn.lock* ./
RUN corepack enable && yarn install
"#;

pub const NODE_INSTALL_PNPM: &str = r#"COPY package.json pnpm-lock.yaml* ./
RUN corepack enable && pnpm install
"#;

pub const NODE_INSTALL_BUN: &str = r#"COPY package.json bun.lockb* ./
RUN npm install -g bun && bun install
"#;

macro_rules! node_single_stage {
    () => {
        concat!(
            r#"FROM {{base_image}}

WORKDIR /app

RUN apk add --no-cache curl

{{install_block}}

COPY . .

ENV NODE_ENV=production \
    PORT={{port}}

RUN chown -R node:node /app
USER node

EXPOSE {{port}}

"#,
            healthcheck!(),
            "\nCMD {{cmd}}\n"
        )
    };
}

pub const JAVASCRIPT_GENERIC: &str = node_single_stage!();

pub const JAVASCRIPT_EXPRESS: &str = node_single_stage!();

pub const JAVASCRIPT_NEXT: &str = concat!(
    r#"FROM {{base_image}} AS builder

WORKDIR /app

{{install_block}}

COPY . .
RUN {{build_cmd}}

FROM {{base_image}} AS runner

WORKDIR /app

ENV NODE_ENV=production \
    PORT={{port}}

RUN apk add --no-cache curl

COPY --from=builder --chown=node:node /app ./
USER node

EXPOSE {{port}}

"#,
    healthcheck!(),
    "\nCMD {{cmd}}\n"
);

pub const JAVASCRIPT_REACT: &str = concat!(
    r#"FROM {{builder_image}} AS builder

WORKDIR /app

{{install_block}}

COPY . .
RUN {{build_cmd}}
RUN mkdir -p out && if [ -d build ]; then cp -r build/. out/; else cp -r dist/. out/; fi

FROM {{runtime_image}}

COPY --from=builder /app/out /usr/share/nginx/html
RUN sed -i 's/listen\([[:space:]]*\)80;/listen\1{{port}};/' /etc/nginx/conf.d/default.conf

EXPOSE {{port}}

"#,
    healthcheck!(),
    "\nCMD [\"nginx\", \"-g\", \"daemon off;\"]\n"
);

pub const JAVA_BUILD_MAVEN: &str = r#"RUN mvn -B -q package -DskipTests \
    && cp "$(ls target/*.jar | head -n 1)" /app/app.jar
"#;

pub const JAVA_BUILD_GRADLE: &str = r#"RUN if [ -x ./gradlew ]; then ./gradlew build -x test --no-daemon; else gradle build -x test --no-daemon; fi \
    && cp "$(ls build/libs/*.jar | grep -v -- '-plain.jar' | head -n 1)" /app/app.jar
"#;

macro_rules! java_builder {
    () => {
        r#"FROM {{builder_image}} AS builder

WORKDIR /app

COPY . .
{{build_block}}

FROM {{runtime_image}}

WORKDIR /app

RUN apk add --no-cache curl
RUN addgroup -S appuser && adduser -S appuser -G appuser

COPY --from=builder --chown=appuser:appuser /app/app.jar app.jar
USER appuser

"#
    };
}

pub const JAVA_SPRING: &str = concat!(
    java_builder!(),
    "ENV SERVER_PORT={{port}}\n\nEXPOSE {{port}}\n\n",
    healthcheck!(),
    "\nCMD [\"java\", \"-jar\", \"app.jar\"]\n"
);

pub const JAVA_GENERIC: &str = concat!(
    java_builder!(),
    "EXPOSE {{port}}\n\n",
    healthcheck!(),
    "\nCMD [\"java\", \"-jar\", \"app.jar\"]\n"
);

macro_rules! go_builder {
    () => {
        r#"FROM {{builder_image}} AS builder

WORKDIR /src

COPY go.mod go.sum* ./
RUN go mod download

COPY . .
RUN CGO_ENABLED=0 GOOS=linux go build -o /out/app .

FROM {{runtime_image}}

WORKDIR /app

RUN apk add --no-cache ca-certificates
RUN addgroup -S appuser && adduser -S appuser -G appuser

COPY --from=builder --chown=appuser:appuser /out/app ./app
USER appuser

"#
    };
}

pub const GO_GIN: &str = concat!(
    go_builder!(),
    "ENV GIN_MODE=release \\\n    PORT={{port}}\n\nEXPOSE {{port}}\n\n",
    healthcheck!(),
    "\nCMD [\"./app\"]\n"
);

pub const GO_GENERIC: &str = concat!(
    go_builder!(),
    "ENV PORT={{port}}\n\nEXPOSE {{port}}\n\n",
    healthcheck!(),
    "\nCMD [\"./app\"]\n"
);

pub const RUST_GENERIC: &str = concat!(
    r#"FROM {{base_image}}

WORKDIR /app

RUN apt-get update && apt-get install -y --no-install-recommends \
    curl \
    pkg-config \
    libssl-dev \
    && rm -rf /var/lib/apt/lists/*

COPY . .
RUN cargo build --release

EXPOSE {{port}}

"#,
    healthcheck!(),
    "\nCMD {{cmd}}\n"
);

pub const PHP_GENERIC: &str = concat!(
    r#"FROM {{base_image}}

WORKDIR /app

RUN apt-get update && apt-get install -y --no-install-recommends \
    curl \
    git \
    unzip \
    && rm -rf /var/lib/apt/lists/*

COPY --from=composer:2 /usr/bin/composer /usr/bin/composer

COPY . .
RUN if [ -f composer.json ]; then composer install --no-dev --optimize-autoloader --no-interaction; fi

RUN useradd -m -u 1000 appuser && chown -R appuser:appuser /app
USER appuser

EXPOSE {{port}}

"#,
    healthcheck!(),
    "\nCMD {{cmd}}\n"
);

pub const RUBY_GENERIC: &str = concat!(
    r#"FROM {{base_image}}

WORKDIR /app

RUN apt-get update && apt-get install -y --no-install-recommends \
    build-essential \
    curl \
    && rm -rf /var/lib/apt/lists/*

COPY Gemfile Gemfile.lock* ./
RUN bundle install

COPY . .

RUN useradd -m -u 1000 appuser && chown -R appuser:appuser /app
USER appuser

EXPOSE {{port}}

"#,
    healthcheck!(),
    "\nCMD {{cmd}}\n"
);

/// Last resort when nothing more specific renders
pub const UNIVERSAL: &str = r#"FROM alpine:3.19

WORKDIR /app

COPY . .

EXPOSE {{port}}

CMD ["echo", "Please configure your application"]
"#;

macro_rules! compose_app {
    () => {
        r#"services:
  app:
    build: .
    ports:
      - "{{port}}:{{port}}"
"#
    };
}

macro_rules! compose_app_health {
    () => {
        r#"    restart: unless-stopped
    healthcheck:
      test: {{health_test}}
      interval: 30s
      timeout: 10s
      retries: 3
"#
    };
}

pub const COMPOSE_POSTGRES: &str = concat!(
    compose_app!(),
    r#"    depends_on:
      - db
    environment:
      - PORT={{port}}
      - DATABASE_URL=postgresql://postgres:postgres@db:5432/app
"#,
    compose_app_health!(),
    r#"
  db:
    image: postgres:16-alpine
    environment:
      - POSTGRES_DB=app
      - POSTGRES_USER=postgres
      - POSTGRES_PASSWORD=postgres
    volumes:
      - postgres_data:/var/lib/postgresql/data
    restart: unless-stopped
    healthcheck:
      test: ["CMD-SHELL", "pg_isready -U postgres -d app"]
      interval: 10s
      timeout: 5s
      retries: 5

volumes:
  postgres_data:
"#
);

pub const COMPOSE_REDIS: &str = concat!(
    compose_app!(),
    r#"    depends_on:
      - redis
    environment:
      - PORT={{port}}
      - REDIS_URL=redis://redis:6379
"#,
    compose_app_health!(),
    r#"
  redis:
    image: redis:7-alpine
    restart: unless-stopped
    healthcheck:
      test: ["CMD", "redis-cli", "ping"]
      interval: 10s
      timeout: 5s
      retries: 5
"#
);

pub const COMPOSE_GENERIC: &str = concat!(
    compose_app!(),
    r#"    environment:
      - PORT={{port}}
"#,
    compose_app_health!()
);

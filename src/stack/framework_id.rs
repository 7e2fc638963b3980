crate::define_id_enum_with_display! {
    /// Framework identifier
    FrameworkId {
        Django => "django" : "Django",
        Flask => "flask" : "Flask",
        FastApi => "fastapi" : "FastAPI",
        Tornado => "tornado" : "Tornado",
        Bottle => "bottle" : "Bottle",
        NextJs => "next" : "Next.js" | "nextjs",
        Nuxt => "nuxt" : "Nuxt",
        Gatsby => "gatsby" : "Gatsby",
        React => "react" : "React",
        Vue => "vue" : "Vue",
        Angular => "angular" : "Angular",
        NestJs => "nestjs" : "NestJS",
        Express => "express" : "Express",
        Fastify => "fastify" : "Fastify",
        Spring => "spring" : "Spring Boot" | "spring-boot",
        Quarkus => "quarkus" : "Quarkus",
        Micronaut => "micronaut" : "Micronaut",
        Actix => "actix" : "Actix Web" | "actix-web",
        Axum => "axum" : "Axum",
        Rocket => "rocket" : "Rocket",
        Warp => "warp" : "Warp",
        Gin => "gin" : "Gin",
        Echo => "echo" : "Echo",
        Fiber => "fiber" : "Fiber",
        Gorilla => "gorilla" : "Gorilla",
        Laravel => "laravel" : "Laravel",
        Symfony => "symfony" : "Symfony",
        Rails => "rails" : "Rails",
        Sinatra => "sinatra" : "Sinatra",
        Generic => "generic" : "generic",
    }
}

impl Default for FrameworkId {
    fn default() -> Self {
        Self::Generic
    }
}

impl FrameworkId {
    /// Port the framework listens on out of the box
    pub fn default_port(&self) -> Option<u16> {
        let port = match self {
            Self::Django | Self::FastApi | Self::Laravel | Self::Gatsby => 8000,
            Self::Flask => 5000,
            Self::Express | Self::NextJs | Self::React | Self::Nuxt | Self::Rails => 3000,
            Self::NestJs | Self::Fastify => 3000,
            Self::Vue | Self::Spring | Self::Gin | Self::Echo => 8080,
            Self::Angular => 4200,
            Self::Sinatra => 4567,
            _ => return None,
        };
        Some(port)
    }
}

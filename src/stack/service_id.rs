crate::define_id_enum_with_display! {
    /// External backing service (database, cache, search engine)
    ServiceId {
        PostgreSql => "postgresql" : "PostgreSQL",
        Redis => "redis" : "Redis",
        MongoDb => "mongodb" : "MongoDB",
        MySql => "mysql" : "MySQL",
        Sqlite => "sqlite" : "SQLite",
        Elasticsearch => "elasticsearch" : "Elasticsearch",
        Cassandra => "cassandra" : "Cassandra",
    }
}

impl ServiceId {
    /// Services that hold application data, as opposed to caches
    pub fn is_database(&self) -> bool {
        !matches!(self, Self::Redis | Self::Custom(_))
    }
}

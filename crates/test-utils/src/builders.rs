use serde_json::{Map, Value, json};

/// Builder for job payloads (the JSON body of "create job" / "update job").
pub struct JobPayloadBuilder {
    fields: Map<String, Value>,
}

impl JobPayloadBuilder {
    pub fn new(name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!(name));
        Self { fields }
    }

    /// A payload with no `name` field at all.
    pub fn unnamed() -> Self {
        Self { fields: Map::new() }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.fields.insert("id".to_string(), json!(id));
        self
    }

    pub fn create_ts(mut self, ts: i64) -> Self {
        self.fields.insert("create_ts".to_string(), json!(ts));
        self
    }

    pub fn command(self, cmd: &str) -> Self {
        self.field("command", json!(cmd))
    }

    pub fn schedule(self, cron: &str) -> Self {
        self.field("schedule", json!(cron))
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Vec<u8> {
        Value::Object(self.fields).to_string().into_bytes()
    }
}

/// Builder for "create dag" payloads.
pub struct DagPayloadBuilder {
    name: String,
    spec_lines: Vec<String>,
    nodes: Vec<Value>,
}

impl DagPayloadBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            spec_lines: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Add a raw line to the `jobs` dependency specification.
    pub fn line(mut self, line: &str) -> Self {
        self.spec_lines.push(line.to_string());
        self
    }

    pub fn root(self, job: &str) -> Self {
        self.line(job)
    }

    pub fn after(self, job: &str, parent: &str) -> Self {
        self.line(&format!("{job},{parent}"))
    }

    /// Add a node through the `dag_jobs` list instead of the specification.
    pub fn node(mut self, job: &str, parent: &str) -> Self {
        self.nodes.push(dag_job(job, parent));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut body = Map::new();
        body.insert("name".to_string(), json!(self.name));
        if !self.spec_lines.is_empty() {
            body.insert("jobs".to_string(), json!(self.spec_lines.join("\n")));
        }
        if !self.nodes.is_empty() {
            body.insert("dag_jobs".to_string(), Value::Array(self.nodes));
        }
        Value::Object(body).to_string().into_bytes()
    }
}

fn dag_job(job: &str, parent: &str) -> Value {
    json!({ "job_name": job, "parent_name": parent })
}

/// Payload for "add dag node".
pub fn dag_job_payload(job: &str, parent: &str) -> Vec<u8> {
    dag_job(job, parent).to_string().into_bytes()
}

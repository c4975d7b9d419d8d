/// Entity store errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("edge {from} -> {to} references a missing node")]
    DanglingEdge { from: String, to: String },

    #[error("duplicate edge {from} -[{relationship}]-> {to}")]
    DuplicateEdge {
        from: String,
        to: String,
        relationship: String,
    },

    #[error("self-referencing edge on {id}")]
    SelfEdge { id: String },
}

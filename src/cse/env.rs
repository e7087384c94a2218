//! The environment arena. Each call frame is created as a full snapshot of
//! its parent's bindings (matching the reference model) rather than a
//! parent-pointer chain walked at lookup time; a child only ever grows its
//! own copy from there.

use std::collections::HashMap;

use super::value::Value;

pub struct Environment {
    pub name: usize,
    pub variables: HashMap<String, Value>,
    pub parent: Option<usize>,
}

pub struct EnvArena {
    envs: Vec<Environment>,
}

impl EnvArena {
    pub fn new() -> Self {
        Self {
            envs: vec![Environment {
                name: 0,
                variables: HashMap::new(),
                parent: None,
            }],
        }
    }

    pub fn create_child(&mut self, parent: usize) -> usize {
        let snapshot = self.envs[parent].variables.clone();
        let index = self.envs.len();
        self.envs.push(Environment {
            name: index,
            variables: snapshot,
            parent: Some(parent),
        });
        index
    }

    pub fn bind(&mut self, env: usize, name: String, value: Value) {
        self.envs[env].variables.insert(name, value);
    }

    pub fn lookup(&self, env: usize, name: &str) -> Option<&Value> {
        self.envs[env].variables.get(name)
    }
}

impl Default for EnvArena {
    fn default() -> Self {
        Self::new()
    }
}

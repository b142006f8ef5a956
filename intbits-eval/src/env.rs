use std::collections::HashMap;

use intbits_ast::string::InternSymbol;

use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Environment {
    values: HashMap<InternSymbol, Value>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment {
            values: HashMap::new(),
        }
    }

    pub fn define(&mut self, name: InternSymbol, value: Value) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: InternSymbol) -> Option<&Value> {
        self.values.get(&name)
    }

    pub fn get_mut(&mut self, name: InternSymbol) -> Option<&mut Value> {
        self.values.get_mut(&name)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

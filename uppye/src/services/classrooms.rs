use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use tracing::instrument;
use uuid::Uuid;

/// A classroom as stored and served by the API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Classroom {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ClassroomList {
    pub classrooms: Vec<Classroom>,
}

#[derive(Debug, Clone)]
pub struct SharedClassroomList {
    classrooms: Arc<RwLock<HashMap<Uuid, Classroom>>>,
}

impl Default for SharedClassroomList {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedClassroomList {
    pub fn new() -> SharedClassroomList {
        SharedClassroomList {
            classrooms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn add_classroom(&self, classroom: Classroom) -> anyhow::Result<()> {
        self.classrooms
            .write()
            .await
            .insert(classroom.id, classroom);
        Ok(())
    }

    pub async fn get_classroom(&self, id: &Uuid) -> Option<Classroom> {
        let t = self.classrooms.read().await;
        t.get(id).cloned()
    }

    #[instrument]
    pub async fn get_classrooms(&self) -> ClassroomList {
        let t = self.classrooms.read().await;
        ClassroomList {
            classrooms: t.values().cloned().collect(),
        }
    }

    pub async fn len(&self) -> usize {
        let t = self.classrooms.read().await;
        t.len()
    }

    pub async fn is_empty(&self) -> bool {
        let t = self.classrooms.read().await;
        t.is_empty()
    }
}

//! Fire-once deferred tasks keyed by owner.
//!
//! Secondary animations (card flips, spawned card removal) are scheduled here
//! instead of on bare timers so a superseding transition can cancel whatever
//! its predecessor left pending.

use crate::scheduler::SceneId;

/// Independent timer channel within one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskLane {
    CardFlip,
    CardSpawn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskOwner {
    pub scene: SceneId,
    pub lane: TaskLane,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Clone, Debug)]
struct ScheduledTask<T> {
    id: TaskId,
    owner: TaskOwner,
    due_ms: f64,
    payload: T,
}

#[derive(Clone, Debug)]
pub struct TaskQueue<T> {
    tasks: Vec<ScheduledTask<T>>,
    next_id: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, owner: TaskOwner, due_ms: f64, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            owner,
            due_ms,
            payload,
        });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_owner(&mut self, owner: TaskOwner) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.owner != owner);
        before - self.tasks.len()
    }

    pub fn cancel_scene(&mut self, scene: SceneId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.owner.scene != scene);
        before - self.tasks.len()
    }

    /// Remove and return every task of `scene`, earliest first.
    pub fn take_scene(&mut self, scene: SceneId) -> Vec<(TaskOwner, T)> {
        let mut taken = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].owner.scene == scene {
                taken.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        taken.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)));
        taken.into_iter().map(|t| (t.owner, t.payload)).collect()
    }

    /// Remove and return every task due at `now_ms`, earliest first; ties keep
    /// scheduling order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<(TaskOwner, T)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due_ms <= now_ms {
                due.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)));
        due.into_iter().map(|t| (t.owner, t.payload)).collect()
    }

    pub fn pending(&self, owner: TaskOwner) -> usize {
        self.tasks.iter().filter(|t| t.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

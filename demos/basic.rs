use tickset::{periodic, shared, Clock, Elapsed, Seconds, SecondsTask, Task, TaskSet};

/// Fixed-step simulation at 60 Hz that catches up after late frames
struct Physics {
    steps: u32,
}

#[periodic(compensate_tardiness)]
impl SecondsTask for Physics {
    fn execute(&mut self, _elapsed: f64) -> f64 {
        self.steps += 1;
        1.0 / 60.0
    }
}

/// Reports once per second of counter time
struct Stats;

impl Task for Stats {
    fn execute(&mut self, elapsed: Elapsed, clock: Clock) -> i64 {
        println!("[STATS] {} ticks since the previous update", elapsed.ticks());
        clock.seconds_to_ticks(1.0)
    }
}

fn main() {
    let mut task_set = TaskSet::new(1000, 0.25);
    let physics = shared(Seconds(Physics { steps: 0 }));
    task_set.insert(physics.clone());
    task_set.insert(shared(Stats));

    // frames arriving every 10 to 25 ms for three seconds
    let frame_times = [10u64, 17, 25, 16];
    let mut counter = 0;
    let mut frame = 0;
    while counter <= 3000 {
        task_set.update(counter);
        counter += frame_times[frame % frame_times.len()];
        frame += 1;
    }

    let steps = physics.lock().map(|p| p.0.steps).unwrap_or_default();
    println!("\n📊 RESULTS after 3 seconds of counter time:");
    println!("   Frames: {}", frame);
    println!("   Physics steps: {} (expected ~180)", steps);
}

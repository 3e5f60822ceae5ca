use course_chunker::{index_chunks, Chunker};

fn main() {
    let markdown = r#"
# Operating Systems

## Lecture 4: Scheduling

The scheduler decides which runnable process gets the CPU next. A good policy balances
throughput, latency, and fairness.

### Round Robin

Each process receives a fixed time slice. When the slice expires the process moves to
the back of the ready queue.

```c
# define QUANTUM 10   /* looks like a header, stays in the code block */
while (1) { run(next(), QUANTUM); }
```

### Multilevel Feedback Queues

Processes that use their whole slice drop to a lower-priority queue; interactive
processes that block early stay near the top.

## Lecture 5: Memory

Virtual memory gives each process the illusion of a private address space.
"#;

    println!("Chunking course document...\n");

    let chunker = Chunker::builder().max_chunk_size(200).build();
    let chunks = chunker.chunk(markdown);

    println!("Generated {} chunks:\n", chunks.len());
    println!("{}", "=".repeat(80));

    for record in index_chunks("os-notes", chunks) {
        println!("\n📄 {}", record.id);
        println!("   Path: {}", record.header_label);
        println!("   Characters: {}", record.content.chars().count());

        let preview: String = record.content.chars().take(100).collect();
        println!("   Preview: {}", preview.replace('\n', " "));

        println!("{}", "-".repeat(80));
    }

    println!("\n✅ Chunking complete!");
}

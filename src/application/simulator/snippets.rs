//! Canned source snippets shown by the simulator.
//!
//! Pre-written display strings, one per operation tag. Nothing here runs.

pub(crate) const STACK_PUSH: &str = r#"// Stack - push operation
struct InventoryStack {
    products: Vec<Product>,
}

impl InventoryStack {
    fn add_product(&mut self, product: Product) {
        // Push product onto the stack (LIFO)
        self.products.push(product);

        println!("Pushed to stack: {}", self.products.last().unwrap().name);
        println!("Stack size: {}", self.products.len());
    }
}"#;

pub(crate) const STACK_POP: &str = r#"// Stack - pop operation
impl InventoryStack {
    fn remove_recent_product(&mut self) -> Option<Product> {
        // Pop from the stack (LIFO - Last In First Out)
        let removed = self.products.pop()?;

        println!("Popped from stack: {}", removed.name);
        println!("Remaining items: {}", self.products.len());
        Some(removed)
    }

    fn peek_recent_product(&self) -> Option<&Product> {
        // Peek at the top without removing
        self.products.last()
    }
}"#;

pub(crate) const QUEUE_ENQUEUE: &str = r#"// Queue - enqueue operation
use std::collections::VecDeque;

struct ExpiryQueue {
    queue: VecDeque<Product>,
}

impl ExpiryQueue {
    fn add_to_expiry_queue(&mut self, product: Product) {
        // Add to the back of the queue (FIFO)
        self.queue.push_back(product);

        // Keep processing order aligned with expiry dates
        self.queue
            .make_contiguous()
            .sort_by_key(|p| p.expiry_date);

        println!("Queue size: {}", self.queue.len());
    }
}"#;

pub(crate) const QUEUE_DEQUEUE: &str = r#"// Queue - dequeue operation
impl ExpiryQueue {
    fn process_next_expired(&mut self) -> Option<Product> {
        // Remove from the front of the queue (FIFO)
        let expired = self.queue.pop_front()?;

        // Apply a clearance discount based on how close the date is
        let discount = match expired.days_until_expiry() {
            d if d < 0 => 0.5,  // 50% off once expired
            d if d <= 3 => 0.3, // 30% off within 3 days
            d if d <= 7 => 0.1, // 10% off within 7 days
            _ => 0.0,
        };

        println!("Dequeued: {} (discount {})", expired.name, discount);
        Some(expired)
    }
}"#;

pub(crate) const PRIORITY_QUEUE_INSERT: &str = r#"// Priority queue - insert operation
use std::cmp::Reverse;
use std::collections::BinaryHeap;

struct PriorityExpiryQueue {
    // min-heap on the priority value (0 = most urgent)
    heap: BinaryHeap<Reverse<(i32, Product)>>,
}

impl PriorityExpiryQueue {
    fn add_urgent_product(&mut self, product: Product) {
        let priority = priority_for_days_left(product.days_until_expiry());

        // Insert; the heap property is restored automatically
        self.heap.push(Reverse((priority, product)));

        println!("Priority: {}", priority);
    }
}"#;

pub(crate) const PRIORITY_QUEUE_REMOVE: &str = r#"// Priority queue - remove operation
impl PriorityExpiryQueue {
    fn most_urgent_product(&self) -> Option<&Product> {
        // Peek at the highest priority (lowest value) without removing
        self.heap.peek().map(|Reverse((_, p))| p)
    }

    fn process_most_urgent(&mut self) -> Option<Product> {
        // Remove and return the highest-priority product.
        // O(log n) for the heap rebalance.
        let Reverse((priority, urgent)) = self.heap.pop()?;
        println!("Processing urgent product: {} ({})", urgent.name, priority);
        Some(urgent)
    }
}"#;

pub(crate) const QUICK_SORT: &str = r#"// Quick sort over expiry dates
fn quick_sort(products: &mut [Product]) {
    if products.len() <= 1 {
        return;
    }
    let pivot = partition(products);
    let (left, right) = products.split_at_mut(pivot);
    quick_sort(left);
    quick_sort(&mut right[1..]);
    // O(n log n) average
}

fn partition(products: &mut [Product]) -> usize {
    // Pivot on the last element's expiry date
    let last = products.len() - 1;
    let mut store = 0;
    for i in 0..last {
        if products[i].expiry_date <= products[last].expiry_date {
            products.swap(i, store);
            store += 1;
        }
    }
    products.swap(store, last);
    store
}"#;

pub(crate) const BINARY_SEARCH: &str = r#"// Binary search by name
fn search_by_name<'a>(products: &'a [Product], target: &str) -> Option<&'a Product> {
    // Binary search requires a sorted slice
    debug_assert!(products.windows(2).all(|w| w[0].name <= w[1].name));

    let mut left = 0;
    let mut right = products.len();
    while left < right {
        let mid = left + (right - left) / 2;
        match products[mid].name.as_str().cmp(target) {
            std::cmp::Ordering::Equal => return Some(&products[mid]),
            std::cmp::Ordering::Less => left = mid + 1,
            std::cmp::Ordering::Greater => right = mid,
        }
    }
    // O(log n) comparisons either way
    None
}"#;

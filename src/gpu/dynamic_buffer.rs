//! Growable typed GPU buffers.
//!
//! Instance data changes size every frame (visible objects, drifting
//! nucleotides, labels), so the buffers grow with a 2x strategy and never
//! shrink. GPU buffers cannot be resized in place.

/// A typed GPU buffer that grows automatically when written past capacity.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    /// Capacity in items.
    capacity: usize,
    /// Items currently written.
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: std::marker::PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with the given initial capacity in items.
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = capacity.max(1);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of::<T>() * capacity) as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Write `data` to the buffer, growing it if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups referencing
    /// it need recreation).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let reallocated = if data.len() > self.capacity {
            let new_capacity = data.len() * 2;
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: (std::mem::size_of::<T>() * new_capacity) as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items currently written.
    pub fn count(&self) -> usize {
        self.count
    }

    /// True when no items are written.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current capacity in items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

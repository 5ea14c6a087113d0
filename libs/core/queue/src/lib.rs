// [libs/core/queue/src/lib.rs]
/*!
 * =================================================================
 * APARATO: BOUNDED MESSAGE QUEUE (ESTRATO L3)
 * CLASIFICACION: CORE PRIMITIVE
 * RESPONSABILIDAD: RELEVO FIFO ENTRE ETAPAS CON CIERRE DRAIN-THEN-CLOSE
 *
 * Unico punto de contacto entre dos etapas del pipeline. No hay
 * prioridad, no hay redelivery, no hay retencion: un mensaje entregado
 * a `recv` desaparece de la cola.
 * =================================================================
 */

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};
use tracing::{debug, instrument};

/// La cola ha sido cerrada y drenada: no llegaran mas mensajes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("queue closed")]
pub struct Closed;

struct Inner {
    messages: VecDeque<Vec<u8>>,
    closed: bool,
}

/// Cola de byte-mensajes de un solo productor / multiples consumidores.
///
/// `send` nunca bloquea salvo por la adquisicion breve del mutex interno
/// (la cola de referencia es no acotada; un backend acotado bloquearia
/// aqui hasta que hubiera espacio). `recv` bloquea mientras la cola este
/// vacia y no cerrada.
pub struct Queue {
    inner: Mutex<Inner>,
    notify: Notify,
}

impl Queue {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                messages: VecDeque::new(),
                closed: false,
            }),
            notify: Notify::new(),
        })
    }

    /// Encola un mensaje. Falla solo despues de que `close` haya sido invocado.
    pub async fn send(&self, message: Vec<u8>) -> Result<(), Closed> {
        let mut inner = self.inner.lock().await;
        if inner.closed {
            return Err(Closed);
        }
        inner.messages.push_back(message);
        drop(inner);
        self.notify.notify_one();
        Ok(())
    }

    /// Bloquea mientras la cola este vacia y abierta. Una vez cerrada y
    /// drenada, esta llamada y toda llamada bloqueada retornan `Closed`.
    pub async fn recv(&self) -> Result<Vec<u8>, Closed> {
        loop {
            let notified = {
                let mut inner = self.inner.lock().await;
                if let Some(message) = inner.messages.pop_front() {
                    return Ok(message);
                }
                if inner.closed {
                    return Err(Closed);
                }
                // Registramos el interes en ser notificados ANTES de soltar
                // el candado: cierra la ventana de carrera donde un `send`
                // o `close` concurrente se perderia.
                self.notify.notified()
            };
            notified.await;
        }
    }

    /// Idempotente. Marca la cola como en drenaje y despierta a todos los
    /// consumidores bloqueados para que reevaluen la bandera.
    #[instrument(skip(self))]
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        if inner.closed {
            return;
        }
        inner.closed = true;
        drop(inner);
        debug!("queue closed, waking all waiters");
        self.notify.notify_waiters();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn fifo_order_single_consumer() {
        let queue = Queue::new();
        queue.send(b"a".to_vec()).await.unwrap();
        queue.send(b"b".to_vec()).await.unwrap();
        queue.send(b"c".to_vec()).await.unwrap();

        assert_eq!(queue.recv().await.unwrap(), b"a".to_vec());
        assert_eq!(queue.recv().await.unwrap(), b"b".to_vec());
        assert_eq!(queue.recv().await.unwrap(), b"c".to_vec());
    }

    #[tokio::test]
    async fn recv_blocks_then_closed_after_drain() {
        let queue = Queue::new();
        queue.send(b"only".to_vec()).await.unwrap();

        assert_eq!(queue.recv().await.unwrap(), b"only".to_vec());

        let q2 = queue.clone();
        let waiter = tokio::spawn(async move { q2.recv().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        queue.close().await;

        assert_eq!(waiter.await.unwrap(), Err(Closed));
    }

    #[tokio::test]
    async fn send_after_close_fails() {
        let queue = Queue::new();
        queue.close().await;
        assert_eq!(queue.send(b"x".to_vec()).await, Err(Closed));
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let queue = Queue::new();
        queue.close().await;
        queue.close().await;
        assert_eq!(queue.recv().await, Err(Closed));
    }

    #[tokio::test]
    async fn no_consumer_remains_blocked_after_shutdown() {
        let queue = Queue::new();
        let mut waiters = Vec::new();
        for _ in 0..4 {
            let q = queue.clone();
            waiters.push(tokio::spawn(async move { q.recv().await }));
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        queue.close().await;

        for waiter in waiters {
            assert_eq!(waiter.await.unwrap(), Err(Closed));
        }
    }
}

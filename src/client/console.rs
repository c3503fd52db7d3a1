use std::io::{self, BufRead, Write};

use tracing::debug;

use super::{ClientError, InventoryClient};
use crate::models::Product;

const MENU: &str = "\n--- Menú de opciones ---
1. Listar todos los productos
2. Listar productos a reponer
3. Agregar stock
4. Quitar stock
0. Salir";

/// Interactive menu over any line source and sink. Every action is awaited
/// before the next prompt; a failed action is reported and the loop goes on.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs until the user picks `0` or input is exhausted.
    pub async fn run(&mut self, client: &InventoryClient) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(option) = self.prompt("Seleccione una opción: ")? else {
                return Ok(());
            };

            let outcome = match option.as_str() {
                "1" => match client.list_products().await {
                    Ok(products) => Ok(render_products(&mut self.output, &products)?),
                    Err(e) => Err(e),
                },
                "2" => match client.list_restock().await {
                    Ok(products) => Ok(render_products(&mut self.output, &products)?),
                    Err(e) => Err(e),
                },
                "3" => self.adjust(client, "Cantidad a agregar: ", true).await?,
                "4" => self.adjust(client, "Cantidad a quitar: ", false).await?,
                "0" => return Ok(()),
                _ => {
                    writeln!(self.output, "Opción inválida.")?;
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                debug!(option = %option, error = %e, "Console action failed");
                writeln!(self.output, "❌ Error: {}", e)?;
            }
        }
    }

    /// Outer error: the console itself broke. Inner error: the action failed.
    async fn adjust(
        &mut self,
        client: &InventoryClient,
        amount_prompt: &str,
        add: bool,
    ) -> io::Result<Result<(), ClientError>> {
        let id = match self.read_number("ID del producto: ")? {
            Ok(id) => id,
            Err(e) => return Ok(Err(e)),
        };
        let amount = match self.read_number(amount_prompt)? {
            Ok(amount) => amount,
            Err(e) => return Ok(Err(e)),
        };

        let result = if add {
            client.add_stock(id, amount).await
        } else {
            client.remove_stock(id, amount).await
        };

        match result {
            Ok(_) if add => writeln!(self.output, "✅ Stock agregado correctamente.")?,
            Ok(_) => writeln!(self.output, "✅ Stock quitado correctamente.")?,
            Err(e) => return Ok(Err(e)),
        }
        Ok(Ok(()))
    }

    fn read_number(&mut self, label: &str) -> io::Result<Result<i64, ClientError>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(Err(ClientError::InvalidInput("no input".to_string())));
        };
        Ok(raw
            .parse::<i64>()
            .map_err(|_| ClientError::InvalidInput(format!("'{}' no es un número entero", raw))))
    }

    /// `None` on end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Fixed-width table: id, name, price as currency, stock.
pub fn render_products<W: Write>(out: &mut W, products: &[Product]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{:>2} | {:<20} | {:>10} | {:>5}", "ID", "Nombre", "Precio", "Stock")?;
    writeln!(out, "{}", "-".repeat(48))?;
    if products.is_empty() {
        writeln!(out, "(sin productos)")?;
    }
    for p in products {
        writeln!(
            out,
            "{:>2} | {:<20} | {:>10} | {:>5}",
            p.id,
            p.name,
            format!("${:.2}", p.price_dollars()),
            p.stock
        )?;
    }
    Ok(())
}
